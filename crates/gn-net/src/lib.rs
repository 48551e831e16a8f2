//! `gn-net`: the outbound side of the scheduler.
//!
//! Every step an agent takes becomes a [`PositionUpdate`] handed to a
//! [`Broadcaster`].  Delivery is fire-and-forget: `broadcast` has no return
//! value and the scheduler never waits on a recipient.
//!
//! | Backend               | Delivers to                                      |
//! |-----------------------|--------------------------------------------------|
//! | [`ChannelBroadcaster`] | a `crossbeam-channel` receiver (bounded or not) |
//! | [`CsvBroadcaster`]    | a `csv::Writer` event log (`agent_id,x,y,session`) |
//! | [`MemoryBroadcaster`] | an in-memory `Vec<Envelope>`                     |
//! | [`NoopBroadcaster`]   | nowhere                                          |
//!
//! # Usage
//!
//! ```rust,ignore
//! use gn_net::{Broadcaster, ChannelBroadcaster, PositionUpdate};
//!
//! let (tx, rx) = ChannelBroadcaster::bounded(1024);
//! tx.broadcast(&PositionUpdate::new(AgentId(0), Cell::new(1, 2)), None, SessionId(0));
//! let envelope = rx.recv()?;
//! ```

pub mod broadcaster;
pub mod channel;
pub mod error;
pub mod event;
pub mod event_log;

#[cfg(test)]
mod tests;

pub use broadcaster::{Broadcaster, MemoryBroadcaster, NoopBroadcaster};
pub use channel::ChannelBroadcaster;
pub use error::{NetError, NetResult};
pub use event::{Envelope, PositionUpdate};
pub use event_log::CsvBroadcaster;
