//! The `GoalSelector` trait: how an idle agent picks where to go next.

use gn_core::{AgentId, AgentRng, Cell, SchedulerConfig};
use gn_grid::GridMap;

/// Pluggable goal choice for idle agents.
///
/// Called once per idle tick.  Implementations must terminate in bounded
/// time even on grids with few or no walkable cells; returning `None` makes
/// the scheduler skip the tick and try again on the next one.
///
/// # Thread safety
///
/// The scheduler may call `select_goal` for several agents at once, so
/// implementations must be `Send + Sync`.  Per-agent randomness comes from
/// the `rng` argument, never from state inside the selector.
pub trait GoalSelector: Send + Sync {
    fn select_goal(
        &self,
        agent:    AgentId,
        position: Cell,
        grid:     &GridMap,
        rng:      &mut AgentRng,
    ) -> Option<Cell>;
}

// ── RandomWalkableGoal ────────────────────────────────────────────────────────

/// Uniform random draws over the grid's bounds, keeping the first walkable
/// cell that is not the agent's own position.  Gives up after `max_draws`.
#[derive(Copy, Clone, Debug)]
pub struct RandomWalkableGoal {
    max_draws: u32,
}

impl RandomWalkableGoal {
    /// `max_draws` is clamped to at least 1.
    pub fn new(max_draws: u32) -> Self {
        Self { max_draws: max_draws.max(1) }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.max_goal_draws)
    }

    pub fn max_draws(&self) -> u32 {
        self.max_draws
    }
}

impl GoalSelector for RandomWalkableGoal {
    fn select_goal(
        &self,
        _agent:   AgentId,
        position: Cell,
        grid:     &GridMap,
        rng:      &mut AgentRng,
    ) -> Option<Cell> {
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        (0..self.max_draws)
            .map(|_| Cell::new(rng.gen_range(0..w), rng.gen_range(0..h)))
            .find(|&c| c != position && grid.is_walkable_cell(c))
    }
}

// ── WaypointGoals ─────────────────────────────────────────────────────────────

/// Patrol between a fixed set of waypoints, picking uniformly among those
/// that are walkable and not the agent's current position.
#[derive(Clone, Debug)]
pub struct WaypointGoals {
    waypoints: Vec<Cell>,
}

impl WaypointGoals {
    pub fn new(waypoints: Vec<Cell>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Cell] {
        &self.waypoints
    }
}

impl GoalSelector for WaypointGoals {
    fn select_goal(
        &self,
        _agent:   AgentId,
        position: Cell,
        grid:     &GridMap,
        rng:      &mut AgentRng,
    ) -> Option<Cell> {
        let candidates: Vec<Cell> = self
            .waypoints
            .iter()
            .copied()
            .filter(|&c| c != position && grid.is_walkable_cell(c))
            .collect();
        rng.choose(&candidates).copied()
    }
}
