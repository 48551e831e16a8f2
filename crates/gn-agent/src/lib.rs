//! `gn-agent`: per-agent state and goal selection.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                     |
//! |-----------|--------------------------------------------------------------|
//! | [`agent`] | `Agent`, `AgentState` (Idle → Planning → HasPath → Idle)     |
//! | [`goal`]  | `GoalSelector` trait, `RandomWalkableGoal`, `WaypointGoals`  |
//!
//! # Ownership
//!
//! An `Agent` is owned by exactly one scheduler slot.  Nothing else mutates
//! its position or step queue; the pathfinder only produces a fresh `Path`
//! that the agent copies into its own queue.

pub mod agent;
pub mod goal;


pub use agent::{Agent, AgentState};
pub use goal::{GoalSelector, RandomWalkableGoal, WaypointGoals};
