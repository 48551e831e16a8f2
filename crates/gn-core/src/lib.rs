//! `gn-core`: foundational types for the `gridnav` workspace.
//!
//! This crate is a dependency of every other `gn-*` crate.  It has no `gn-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`cell`]   | `Cell`, Manhattan distance, 4-neighbour offsets           |
//! | [`ids`]    | `AgentId`, `SessionId`, `RecipientId`                     |
//! | [`time`]   | `Tick`, `Cadence`, `MissedTickPolicy`, `SchedulerConfig`  |
//! | [`rng`]    | `AgentRng` (per-agent, deterministic)                     |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod cell;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, NEIGHBOUR_OFFSETS};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, RecipientId, SessionId};
pub use rng::AgentRng;
pub use time::{Cadence, MissedTickPolicy, SchedulerConfig, Tick};
