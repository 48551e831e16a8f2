//! The `AgentScheduler` struct and its wake-tick loop.

use std::sync::Arc;

use gn_agent::{Agent, GoalSelector};
use gn_core::{AgentId, AgentRng, Cadence, Cell, MissedTickPolicy, RecipientId, SchedulerConfig, SessionId, Tick};
use gn_grid::{GridMap, Pathfinder};
use gn_net::{Broadcaster, PositionUpdate};
use gn_schedule::WakeQueue;
use tracing::{debug, trace, warn};

use crate::{SchedulerObserver, SimError, SimResult};

// ── TickOutcome ───────────────────────────────────────────────────────────────

/// What one agent did on one of its scheduled ticks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    /// Took the next queued step; the update was broadcast.
    Moved(PositionUpdate),
    /// Chose `goal` and queued `steps` steps towards it.
    Planned { goal: Cell, steps: usize },
    /// Chose `goal` but no path exists.  The agent stays idle and picks a
    /// new goal on a later tick.
    Unreachable { goal: Cell },
    /// Goal selection gave up; the tick was skipped.
    NoGoal,
    /// A search for this agent was already in flight.
    Busy,
}

// ── Per-agent slot ────────────────────────────────────────────────────────────

pub(crate) struct AgentSlot {
    pub(crate) agent:     Agent,
    pub(crate) cadence:   Cadence,
    /// The tick of this agent's single pending wake-queue entry.
    pub(crate) next_wake: Tick,
}

// ── AgentScheduler ────────────────────────────────────────────────────────────

/// Drives every registered agent through plan / follow cycles.
///
/// `AgentScheduler<P, G, B>` owns all agents and the one wake queue that
/// holds their timers.  Processing a wake tick runs in two phases:
///
/// 1. **Agent phase** (optionally parallel with the `parallel` feature): each
///    due agent either takes its next queued step or, when idle, picks a goal
///    and searches for a path.  Agents only touch their own slot and the
///    read-only grid.
/// 2. **Apply phase** (sequential, ascending `AgentId`): broadcast moves,
///    reschedule each agent at its next cadence slot, log, and notify the
///    observer.
///
/// The clock is explicit: nothing happens until [`advance_to`][Self::advance_to]
/// or [`step`][Self::step] is called.  [`RealtimeScheduler`][crate::RealtimeScheduler]
/// calls `advance_to` from a dedicated thread against the wall clock.
///
/// Create via [`SchedulerBuilder`][crate::SchedulerBuilder].
pub struct AgentScheduler<P: Pathfinder, G: GoalSelector, B: Broadcaster> {
    pub(crate) config:      SchedulerConfig,
    pub(crate) grid:        Arc<GridMap>,
    pub(crate) pathfinder:  P,
    pub(crate) goals:       G,
    pub(crate) broadcaster: B,
    pub(crate) session:     SessionId,
    pub(crate) exclude:     Option<RecipientId>,

    /// Live agents only, sorted by ascending `AgentId`.  Ids are handed out
    /// monotonically, so registration appends and lookups binary-search.
    pub(crate) slots:       Vec<AgentSlot>,
    /// The id the next registration gets.  Ids are never reused.
    pub(crate) next_id:     usize,
    pub(crate) wake_queue:  WakeQueue,
    pub(crate) now:         Tick,
}

impl<P: Pathfinder, G: GoalSelector, B: Broadcaster> AgentScheduler<P, G, B> {
    // ── Registration ──────────────────────────────────────────────────────

    /// Register an idle agent on `position` with the configured cadence.
    pub fn register(&mut self, position: Cell) -> SimResult<AgentId> {
        self.register_with(position, self.config.cadence())
    }

    /// Register an idle agent on `position` with its own cadence.  Its first
    /// tick is `now + cadence.initial_delay_ms`.
    pub fn register_with(&mut self, position: Cell, cadence: Cadence) -> SimResult<AgentId> {
        cadence.validate()?;
        if !self.grid.is_walkable_cell(position) {
            return Err(SimError::NotWalkable { cell: position });
        }
        let id = AgentId::try_from(self.next_id).map_err(|_| SimError::IdsExhausted)?;

        let first = cadence.first_tick(self.now);
        self.wake_queue.push(first, id);
        self.slots.push(AgentSlot {
            agent: Agent::new(id, position, AgentRng::new(self.config.seed, id)),
            cadence,
            next_wake: first,
        });
        self.next_id += 1;

        debug!(agent = %id, %position, first_tick = %first, "agent registered");
        Ok(id)
    }

    /// Remove an agent and cancel its pending tick.
    pub fn deregister(&mut self, id: AgentId) -> SimResult<Agent> {
        let pos = self.slot_index(id).ok_or(SimError::AgentNotFound(id))?;
        let slot = self.slots.remove(pos);
        self.wake_queue.cancel(slot.next_wake, id);

        debug!(agent = %id, position = %slot.agent.position(), "agent deregistered");
        Ok(slot.agent)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.slot_index(id).map(|i| &self.slots[i].agent)
    }

    /// All live agents in ascending `AgentId` order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.slots.iter().map(|s| &s.agent)
    }

    /// Number of live (registered, not deregistered) agents.
    pub fn agent_count(&self) -> usize {
        self.slots.len()
    }

    fn slot_index(&self, id: AgentId) -> Option<usize> {
        self.slots.binary_search_by_key(&id, |s| s.agent.id()).ok()
    }

    /// The scheduler clock: the last tick processed or advanced to.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// The earliest pending agent tick, if any agent is registered.
    pub fn next_due(&self) -> Option<Tick> {
        self.wake_queue.next_tick()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn grid(&self) -> &Arc<GridMap> {
        &self.grid
    }

    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    /// Process wake ticks `<= target` in ascending order, then set the clock
    /// to `target`.  Returns the number of agent ticks processed.
    ///
    /// With [`MissedTickPolicy::Burst`] every slot up to `target` runs.  With
    /// [`MissedTickPolicy::Skip`] an agent runs once per call and resumes on
    /// its first slot after `target`.
    pub fn advance_to<O: SchedulerObserver>(&mut self, target: Tick, observer: &mut O) -> usize {
        let mut processed = 0;
        while let Some((tick, due)) = self.wake_queue.pop_due(target) {
            processed += self.process_tick(tick, &due, target, observer);
        }
        self.now = self.now.max(target);
        processed
    }

    /// Process only the next pending wake tick, moving the clock onto it.
    /// Returns the number of agent ticks processed (0 if nothing is queued).
    pub fn step<O: SchedulerObserver>(&mut self, observer: &mut O) -> usize {
        let Some(tick) = self.wake_queue.next_tick() else {
            return 0;
        };
        match self.wake_queue.drain_tick(tick) {
            Some(due) => self.process_tick(tick, &due, tick, observer),
            None => 0,
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SchedulerObserver>(
        &mut self,
        tick:     Tick,
        due:      &[AgentId],
        horizon:  Tick,
        observer: &mut O,
    ) -> usize {
        self.now = self.now.max(tick);
        observer.on_tick_start(tick, due.len());

        // ── Phase 1: agent phase ──────────────────────────────────────────
        let outcomes = self.run_agents(due);

        // ── Phase 2: apply phase ──────────────────────────────────────────
        //
        // `due` is sorted by the wake queue, and both loop variants preserve
        // its order, so broadcasts and hooks are deterministic.
        let policy = self.config.missed_ticks;
        for &(id, outcome) in &outcomes {
            self.report(tick, id, &outcome);

            if let Some(i) = self.slot_index(id) {
                let slot = &mut self.slots[i];
                let next = match policy {
                    MissedTickPolicy::Skip => slot.cadence.first_slot_after(tick, horizon),
                    MissedTickPolicy::Burst => slot.cadence.next_after(tick),
                };
                slot.next_wake = next;
                self.wake_queue.push(next, id);
            }

            observer.on_agent_tick(tick, id, &outcome);
        }

        observer.on_tick_end(tick, outcomes.len());
        outcomes.len()
    }

    /// Run one tick for each due agent.
    ///
    /// With the `parallel` Cargo feature, agents run on Rayon's thread pool.
    fn run_agents(&mut self, due: &[AgentId]) -> Vec<(AgentId, TickOutcome)> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let grid       = &*self.grid;
        let pathfinder = &self.pathfinder;
        let goals      = &self.goals;
        let slots      = due_slots(&mut self.slots, due);

        #[cfg(not(feature = "parallel"))]
        {
            slots
                .into_iter()
                .map(|slot| (slot.agent.id(), tick_agent(&mut slot.agent, grid, pathfinder, goals)))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            slots
                .into_par_iter()
                .map(|slot| (slot.agent.id(), tick_agent(&mut slot.agent, grid, pathfinder, goals)))
                .collect()
        }
    }

    fn report(&self, tick: Tick, id: AgentId, outcome: &TickOutcome) {
        match *outcome {
            TickOutcome::Moved(update) => {
                self.broadcaster.broadcast(&update, self.exclude, self.session);
                trace!(%tick, agent = %id, x = update.x, y = update.y, "moved");
            }
            TickOutcome::Planned { goal, steps } => {
                debug!(%tick, agent = %id, %goal, steps, "path planned");
            }
            TickOutcome::Unreachable { goal } => {
                debug!(%tick, agent = %id, %goal, "goal unreachable, retrying later");
            }
            TickOutcome::NoGoal => {
                warn!(%tick, agent = %id, "no walkable goal found, tick skipped");
            }
            TickOutcome::Busy => {
                debug!(%tick, agent = %id, "search already in flight, tick skipped");
            }
        }
    }
}

/// One scheduled tick for one agent: follow the queued path if there is one,
/// otherwise plan a new one.
fn tick_agent<P: Pathfinder, G: GoalSelector>(
    agent:      &mut Agent,
    grid:       &GridMap,
    pathfinder: &P,
    goals:      &G,
) -> TickOutcome {
    if let Some(cell) = agent.advance() {
        return TickOutcome::Moved(PositionUpdate::new(agent.id(), cell));
    }
    if !agent.begin_planning() {
        return TickOutcome::Busy;
    }

    let (id, position) = (agent.id(), agent.position());
    let Some(goal) = goals.select_goal(id, position, grid, agent.rng_mut()) else {
        agent.cancel_planning();
        return TickOutcome::NoGoal;
    };

    let path = pathfinder.find_path(grid, position, goal);
    let found = path.is_some();
    let steps = agent.finish_planning(path);
    if found {
        TickOutcome::Planned { goal, steps }
    } else {
        TickOutcome::Unreachable { goal }
    }
}

/// Disjoint `&mut` borrows of the live slots named by `due`.
///
/// `slots` and `due` must both be sorted ascending (`due` as returned by the
/// wake queue); ids that are out of order or not registered are skipped.
fn due_slots<'a>(slots: &'a mut [AgentSlot], due: &[AgentId]) -> Vec<&'a mut AgentSlot> {
    let mut out  = Vec::with_capacity(due.len());
    let mut rest = slots;

    for &id in due {
        match rest.binary_search_by_key(&id, |s| s.agent.id()) {
            Ok(i) => {
                let (_, tail) = std::mem::take(&mut rest).split_at_mut(i);
                let Some((slot, tail)) = tail.split_first_mut() else {
                    break;
                };
                out.push(slot);
                rest = tail;
            }
            Err(i) => rest = &mut std::mem::take(&mut rest)[i..],
        }
    }
    out
}
