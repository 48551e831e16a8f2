//! `WakeQueue`: sparse per-tick agent activation queue.
//!
//! # Why this exists
//!
//! Most ticks of the scheduler clock have no agent due.  Iterating all N
//! agents every millisecond to ask "is it your turn?" would cost O(N) per
//! tick regardless of how many agents actually need to run.
//!
//! `WakeQueue` inverts the problem: after an agent's tick it registers the
//! tick of its next slot.  The scheduler drains only the agents due at that
//! tick, O(active) work instead of O(N).
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) insert, pop and cancel where W = number of
//! distinct wake ticks currently enqueued.  Agents sharing a cadence and a
//! registration time share a key, so W is usually far below N.

use std::collections::BTreeMap;

use gn_core::{AgentId, Tick};

/// A priority-queue mapping scheduler ticks → agents that must wake at that tick.
#[derive(Default, Debug)]
pub struct WakeQueue {
    inner: BTreeMap<Tick, Vec<AgentId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl WakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `agent` to wake at `tick`.
    ///
    /// The queue does not deduplicate: the scheduler keeps at most one entry
    /// per agent by pushing only after the previous entry was drained or
    /// cancelled.
    pub fn push(&mut self, tick: Tick, agent: AgentId) {
        self.inner.entry(tick).or_default().push(agent);
        self.total += 1;
    }

    /// Remove `agent`'s entry at `tick`.  Returns `false` if there was none.
    pub fn cancel(&mut self, tick: Tick, agent: AgentId) -> bool {
        let Some(agents) = self.inner.get_mut(&tick) else {
            return false;
        };
        let Some(pos) = agents.iter().position(|&a| a == agent) else {
            return false;
        };
        agents.swap_remove(pos);
        if agents.is_empty() {
            self.inner.remove(&tick);
        }
        self.total -= 1;
        true
    }

    /// Remove and return all agents scheduled for exactly `tick`, sorted by
    /// ascending `AgentId`.
    ///
    /// Returns `None` if no agents are queued for that tick.
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<AgentId>> {
        let mut agents = self.inner.remove(&tick)?;
        self.total -= agents.len();
        agents.sort_unstable();
        Some(agents)
    }

    /// Pop the earliest tick if it is `<= horizon`, with its agents sorted by
    /// ascending `AgentId`.
    pub fn pop_due(&mut self, horizon: Tick) -> Option<(Tick, Vec<AgentId>)> {
        let tick = self.next_tick().filter(|&t| t <= horizon)?;
        self.drain_tick(tick).map(|agents| (tick, agents))
    }

    /// The earliest tick with at least one queued agent, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total number of (tick, agent) entries across all future ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct future ticks that have at least one queued agent.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }
}
