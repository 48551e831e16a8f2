//! Scheduler observer trait for progress reporting and data collection.

use gn_core::{AgentId, Cell, Tick};

use crate::TickOutcome;

/// Callbacks invoked by [`AgentScheduler`][crate::AgentScheduler] while it
/// processes wake ticks, and by [`RealtimeScheduler`][crate::RealtimeScheduler]
/// when it applies registration commands.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Hooks run on the scheduling thread, in
/// ascending `AgentId` order within a wake tick, even with the `parallel`
/// feature.
///
/// # Example: move counter
///
/// ```rust,ignore
/// struct MoveCounter(usize);
///
/// impl SchedulerObserver for MoveCounter {
///     fn on_agent_tick(&mut self, _tick: Tick, _agent: AgentId, outcome: &TickOutcome) {
///         if matches!(outcome, TickOutcome::Moved(_)) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SchedulerObserver {
    /// Called before any agent due at `tick` runs.  `due` is the number of
    /// agents about to tick.
    fn on_tick_start(&mut self, _tick: Tick, _due: usize) {}

    /// Called once per agent tick, after its update was broadcast and its
    /// next slot was scheduled.
    fn on_agent_tick(&mut self, _tick: Tick, _agent: AgentId, _outcome: &TickOutcome) {}

    /// Called after every agent due at `tick` has run.
    fn on_tick_end(&mut self, _tick: Tick, _processed: usize) {}

    fn on_registered(&mut self, _agent: AgentId, _position: Cell) {}

    fn on_deregistered(&mut self, _agent: AgentId) {}
}

/// A [`SchedulerObserver`] that does nothing.
pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {}
