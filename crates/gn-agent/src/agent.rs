//! Per-agent path-following state.

use std::collections::VecDeque;

use gn_core::{AgentId, AgentRng, Cell};
use gn_grid::Path;

/// Where an agent is in its plan / follow cycle.
///
/// ```text
/// Idle ──begin_planning──▶ Planning ──finish_planning(Some)──▶ HasPath
///  ▲                          │                                 │
///  └──finish_planning(None)───┘◀────── advance() drains queue ──┘
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum AgentState {
    /// No queued steps; the next tick selects a goal.
    #[default]
    Idle,
    /// A search for this agent is in flight.
    Planning,
    /// Steps are queued; each tick consumes one.
    HasPath,
}

/// A scheduled non-player character.
#[derive(Clone, Debug)]
pub struct Agent {
    id:       AgentId,
    position: Cell,
    steps:    VecDeque<Cell>,
    state:    AgentState,
    rng:      AgentRng,
}

impl Agent {
    /// An idle agent standing on `position`.
    pub fn new(id: AgentId, position: Cell, rng: AgentRng) -> Self {
        Self {
            id,
            position,
            steps: VecDeque::new(),
            state: AgentState::Idle,
            rng,
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Cell {
        self.position
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Steps still to be taken, next step first.
    pub fn queued_steps(&self) -> &VecDeque<Cell> {
        &self.steps
    }

    /// Mutable access to this agent's RNG (for goal selection).
    #[inline]
    pub fn rng_mut(&mut self) -> &mut AgentRng {
        &mut self.rng
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Enter `Planning`.  Returns `false` (and changes nothing) unless the
    /// agent is `Idle`, which is what keeps a second search for the same
    /// agent from starting while one is in flight.
    pub fn begin_planning(&mut self) -> bool {
        if self.state != AgentState::Idle {
            return false;
        }
        self.state = AgentState::Planning;
        true
    }

    /// Leave `Planning` with the search result and return the number of
    /// steps queued.
    ///
    /// Only a path that starts on the current position is followed, minus
    /// its start cell, so every step is adjacent to the one before.  `None`,
    /// a path from anywhere else, or a path with no remaining steps returns
    /// the agent to `Idle`.
    pub fn finish_planning(&mut self, path: Option<Path>) -> usize {
        self.steps.clear();
        if let Some(path) = path.filter(|p| p.start() == self.position) {
            self.steps.extend(path.into_steps());
        }
        self.state = if self.steps.is_empty() { AgentState::Idle } else { AgentState::HasPath };
        self.steps.len()
    }

    /// Abandon `Planning` without a search (no goal could be chosen).
    pub fn cancel_planning(&mut self) {
        if self.state == AgentState::Planning {
            self.state = AgentState::Idle;
        }
    }

    // ── Following ─────────────────────────────────────────────────────────

    /// Pop the next step and move onto it.
    ///
    /// Returns the new position, or `None` if nothing was queued.  Draining
    /// the last step returns the agent to `Idle`.
    pub fn advance(&mut self) -> Option<Cell> {
        let next = self.steps.pop_front()?;
        self.position = next;
        if self.steps.is_empty() {
            self.state = AgentState::Idle;
        }
        Some(next)
    }
}
