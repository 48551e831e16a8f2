//! Scheduler time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter of **milliseconds since
//! the scheduler epoch** (the instant the scheduler was built or, for the
//! realtime driver, the instant its thread started):
//!
//!   wall_time = epoch + Duration::from_millis(tick)
//!
//! Using an integer tick as the canonical unit keeps all cadence arithmetic
//! exact and makes discrete-step tests independent of the wall clock.

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute scheduler time in milliseconds since the epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: u64) -> Tick {
        Tick(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Tick corresponding to `elapsed` wall time since the epoch.
    #[inline]
    pub fn from_duration(elapsed: Duration) -> Tick {
        Tick(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }

    #[inline]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T+{}ms", self.0)
    }
}

// ── Cadence ───────────────────────────────────────────────────────────────────

/// When an agent first ticks and how often it ticks afterwards.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cadence {
    /// Delay between registration and the first tick, in milliseconds.
    pub initial_delay_ms: u64,
    /// Fixed-rate period between consecutive ticks, in milliseconds.  Never 0.
    pub interval_ms: u64,
}

impl Cadence {
    /// Build a cadence, rejecting a zero interval.
    pub fn new(initial_delay_ms: u64, interval_ms: u64) -> CoreResult<Self> {
        let cadence = Self { initial_delay_ms, interval_ms };
        cadence.validate()?;
        Ok(cadence)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.interval_ms == 0 {
            return Err(CoreError::Config("cadence interval must be > 0 ms".into()));
        }
        Ok(())
    }

    /// First tick for an agent registered at `registered`.
    #[inline]
    pub fn first_tick(&self, registered: Tick) -> Tick {
        registered.offset(self.initial_delay_ms)
    }

    /// The fixed-rate slot after `due`.
    #[inline]
    pub fn next_after(&self, due: Tick) -> Tick {
        due.offset(self.interval_ms)
    }

    /// The first slot on this cadence's grid (anchored at `due`) that is
    /// strictly after `horizon`.  Returns `next_after(due)` when that is
    /// already past `horizon`.
    pub fn first_slot_after(&self, due: Tick, horizon: Tick) -> Tick {
        let next = self.next_after(due);
        if next > horizon {
            return next;
        }
        let behind = horizon.since(due);
        let periods = behind / self.interval_ms + 1;
        due.offset(periods.saturating_mul(self.interval_ms))
    }
}

// ── MissedTickPolicy ──────────────────────────────────────────────────────────

/// What to do when an agent's next slot is already in the past by the time
/// its tick finishes processing.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MissedTickPolicy {
    /// Drop the missed slots and resume on the first slot after the horizon.
    /// Suits the wall-clock driver after a stall.
    Skip,
    /// Run every missed slot, one after another, like a fixed-rate timer.
    #[default]
    Burst,
}

// ── SchedulerConfig ───────────────────────────────────────────────────────────

/// Top-level scheduler configuration.
///
/// Typically loaded from a TOML file by the application crate and passed to
/// the scheduler builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Delay before an agent's first tick.  Default: 2000 ms.
    pub initial_delay_ms: u64,

    /// Steady-state tick interval.  Default: 300 ms.
    pub interval_ms: u64,

    /// Maximum number of candidate goal draws per idle tick before the tick
    /// is skipped.  Default: 64.
    pub max_goal_draws: u32,

    /// Master RNG seed.  The same seed always produces identical goal draws.
    pub seed: u64,

    /// Catch-up behaviour for slots that fell behind the clock.  Default:
    /// `Burst`.
    pub missed_ticks: MissedTickPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 2_000,
            interval_ms:      300,
            max_goal_draws:   64,
            seed:             0,
            missed_ticks:     MissedTickPolicy::Burst,
        }
    }
}

impl SchedulerConfig {
    /// The cadence every agent gets unless registered with an override.
    pub fn cadence(&self) -> Cadence {
        Cadence {
            initial_delay_ms: self.initial_delay_ms,
            interval_ms:      self.interval_ms,
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.cadence().validate()?;
        if self.max_goal_draws == 0 {
            return Err(CoreError::Config("max_goal_draws must be > 0".into()));
        }
        Ok(())
    }
}
