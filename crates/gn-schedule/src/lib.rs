//! `gn-schedule`: the one timer facility every agent shares.
//!
//! # Crate layout
//!
//! | Module         | Contents                                         |
//! |----------------|--------------------------------------------------|
//! | [`wake_queue`] | `WakeQueue` (`BTreeMap<Tick, Vec<AgentId>>`)     |
//!
//! Instead of one timer (or thread) per agent, each agent registers the tick
//! at which it needs attention next.  The scheduler drains due ticks in
//! order, runs the woken agents, and pushes each one back at its next
//! cadence slot.  Removing an agent cancels its single pending entry.

pub mod wake_queue;

#[cfg(test)]
mod tests;

pub use wake_queue::WakeQueue;
