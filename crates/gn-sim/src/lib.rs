//! `gn-sim`: the agent scheduler for the gridnav workspace.
//!
//! # Agent tick
//!
//! ```text
//! on each scheduled tick of an agent:
//!   steps queued → pop the next step, move onto it, broadcast PositionUpdate
//!   idle         → GoalSelector proposes a goal (bounded draws)
//!                    none  → skip the tick (NoGoal)
//!                    goal  → Pathfinder::find_path(position, goal)
//!                              Some(path) → queue the steps after the start
//!                              None       → stay idle (Unreachable)
//!   reschedule at the agent's next cadence slot
//! ```
//!
//! Agents due on the same wake tick run in the agent phase (parallel with
//! the `parallel` feature); broadcasts, rescheduling and observer hooks run
//! afterwards in ascending `AgentId` order.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the agent phase on Rayon's thread pool.           |
//! | `fx-hash`  | FxHash search bookkeeping in `gn-grid`.                |
//! | `serde`    | Serde derives on config and event types.               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gn_agent::RandomWalkableGoal;
//! use gn_grid::AStarPathfinder;
//! use gn_net::ChannelBroadcaster;
//! use gn_sim::{NoopObserver, RealtimeScheduler, SchedulerBuilder};
//!
//! let (broadcaster, updates) = ChannelBroadcaster::bounded(1024);
//! let goals = RandomWalkableGoal::from_config(&config);
//! let scheduler = SchedulerBuilder::new(config, grid, AStarPathfinder::new(), goals, broadcaster)
//!     .build()?;
//! let driver = RealtimeScheduler::spawn(scheduler, NoopObserver)?;
//! let npc = driver.register(Cell::new(1, 1))?;
//! for envelope in updates.iter() { /* forward to clients */ }
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod realtime;
pub mod scheduler;


pub use builder::SchedulerBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SchedulerObserver};
pub use realtime::RealtimeScheduler;
pub use scheduler::{AgentScheduler, TickOutcome};
