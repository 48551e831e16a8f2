//! Pluggable distance estimates for A*.
//!
//! The frontier ordering in [`crate::search`] only ever calls
//! [`Heuristic::estimate`], so an admissible estimate can be swapped in
//! without touching frontier management.  Optimal paths require the estimate
//! to never exceed the true remaining step count; the closed-set rule
//! additionally assumes consistency (`h(a) <= 1 + h(b)` for neighbours).

use gn_core::Cell;

/// Remaining-cost estimate from `from` to `to`, in steps.
pub trait Heuristic: Send + Sync {
    fn estimate(&self, from: Cell, to: Cell) -> u32;
}

/// `|dx| + |dy|`, exact on an obstacle-free 4-connected unit grid.
#[derive(Copy, Clone, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Cell, to: Cell) -> u32 {
        from.manhattan(to)
    }
}

/// Always 0.  Turns A* into uniform-cost (Dijkstra) search.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    #[inline]
    fn estimate(&self, _from: Cell, _to: Cell) -> u32 {
        0
    }
}

impl<F> Heuristic for F
where
    F: Fn(Cell, Cell) -> u32 + Send + Sync,
{
    #[inline]
    fn estimate(&self, from: Cell, to: Cell) -> u32 {
        self(from, to)
    }
}
