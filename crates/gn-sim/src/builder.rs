//! Fluent builder for constructing an [`AgentScheduler`].

use std::sync::Arc;

use gn_agent::GoalSelector;
use gn_core::{RecipientId, SchedulerConfig, SessionId, Tick};
use gn_grid::{GridMap, Pathfinder};
use gn_net::Broadcaster;
use gn_schedule::WakeQueue;

use crate::{AgentScheduler, SimResult};

/// Fluent builder for [`AgentScheduler<P, G, B>`].
///
/// # Required inputs
///
/// - [`SchedulerConfig`]: cadence, goal-draw budget, seed, missed-tick policy
/// - `Arc<GridMap>`: the shared, immutable walkability grid
/// - `P: Pathfinder`: the search engine (e.g. [`gn_grid::AStarPathfinder`])
/// - `G: GoalSelector`: goal choice for idle agents (e.g. [`gn_agent::RandomWalkableGoal`])
/// - `B: Broadcaster`: where position updates go
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default          |
/// |-------------------|------------------|
/// | `.session(id)`    | `SessionId(0)`   |
/// | `.exclude(r)`     | no exclusion     |
/// | `.start_at(t)`    | `Tick::ZERO`     |
///
/// # Example
///
/// ```rust,ignore
/// let goals = RandomWalkableGoal::from_config(&config);
/// let mut scheduler = SchedulerBuilder::new(config, grid, AStarPathfinder::new(), goals, broadcaster)
///     .session(SessionId(7))
///     .build()?;
/// let npc = scheduler.register(Cell::new(1, 1))?;
/// scheduler.advance_to(Tick(10_000), &mut NoopObserver);
/// ```
pub struct SchedulerBuilder<P: Pathfinder, G: GoalSelector, B: Broadcaster> {
    config:      SchedulerConfig,
    grid:        Arc<GridMap>,
    pathfinder:  P,
    goals:       G,
    broadcaster: B,
    session:     SessionId,
    exclude:     Option<RecipientId>,
    start:       Tick,
}

impl<P: Pathfinder, G: GoalSelector, B: Broadcaster> SchedulerBuilder<P, G, B> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:      SchedulerConfig,
        grid:        Arc<GridMap>,
        pathfinder:  P,
        goals:       G,
        broadcaster: B,
    ) -> Self {
        Self {
            config,
            grid,
            pathfinder,
            goals,
            broadcaster,
            session: SessionId::default(),
            exclude: None,
            start:   Tick::ZERO,
        }
    }

    /// The session every broadcast is addressed to.
    pub fn session(mut self, session: SessionId) -> Self {
        self.session = session;
        self
    }

    /// A recipient left out of every broadcast (typically the client that
    /// owns the session's host view).
    pub fn exclude(mut self, recipient: RecipientId) -> Self {
        self.exclude = Some(recipient);
        self
    }

    /// Initial value of the scheduler clock.
    pub fn start_at(mut self, tick: Tick) -> Self {
        self.start = tick;
        self
    }

    /// Validate the configuration and return an empty scheduler.
    pub fn build(self) -> SimResult<AgentScheduler<P, G, B>> {
        self.config.validate()?;

        Ok(AgentScheduler {
            config:      self.config,
            grid:        self.grid,
            pathfinder:  self.pathfinder,
            goals:       self.goals,
            broadcaster: self.broadcaster,
            session:     self.session,
            exclude:     self.exclude,
            slots:       Vec::new(),
            next_id:     0,
            wake_queue:  WakeQueue::new(),
            now:         self.start,
        })
    }
}
