//! `gn-grid`: occupancy grid, loaders, and A* pathfinding.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`grid`]      | `GridMap` (immutable occupancy), `GridMapBuilder`         |
//! | [`heuristic`] | `Heuristic` trait, `Manhattan`, `ZeroHeuristic`           |
//! | [`search`]    | `Pathfinder` trait, `AStarPathfinder`, `Path`, `SearchStats` |
//! | [`loader`]    | `parse_grid_str`, `load_grid_csv`, `load_grid_reader`     |
//! | [`error`]     | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for search bookkeeping instead of SipHash.          |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `gn-core` types.      |

pub mod error;
pub mod grid;
pub mod heuristic;
pub mod loader;
pub mod search;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use grid::{GridMap, GridMapBuilder};
pub use heuristic::{Heuristic, Manhattan, ZeroHeuristic};
pub use loader::{load_grid_csv, load_grid_reader, parse_grid_str};
pub use search::{AStarPathfinder, Path, Pathfinder, SearchOutcome, SearchStats};
