//! Pathfinding trait and default A* implementation.
//!
//! # Pluggability
//!
//! `gn-sim` calls pathfinding via the [`Pathfinder`] trait, so applications
//! can swap in a scripted or alternative engine without touching the
//! scheduler.  The default [`AStarPathfinder`] is generic over its
//! [`Heuristic`].
//!
//! # Bookkeeping
//!
//! One search call owns all of its state:
//!
//! - an **arena** `Vec<SearchRecord>`: one record per frontier admission,
//!   holding the cell, `g`, `h` and the parent as an arena index;
//! - a **best-g table** keyed by [`Cell`]: a cell is admitted only when it has
//!   no entry or a strictly lower `g` is found;
//! - a **closed set**: expanded cells, never expanded again;
//! - the **frontier**: a min-heap of `(f, h, arena index)`.  Arena indices are
//!   handed out in admission order, so the third key is the insertion-order
//!   tie-break.
//!
//! Everything is dropped when the call returns; the returned [`Path`] is a
//! plain `Vec<Cell>` with no back-references.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use gn_core::Cell;

use crate::heuristic::{Heuristic, Manhattan};
use crate::GridMap;

#[cfg(feature = "fx-hash")]
type CellMap<V> = rustc_hash::FxHashMap<Cell, V>;
#[cfg(not(feature = "fx-hash"))]
type CellMap<V> = std::collections::HashMap<Cell, V>;

#[cfg(feature = "fx-hash")]
type CellSet = rustc_hash::FxHashSet<Cell>;
#[cfg(not(feature = "fx-hash"))]
type CellSet = std::collections::HashSet<Cell>;

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered, non-empty sequence of cells from start to goal, both inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Wrap an explicit cell sequence.  Returns `None` for an empty sequence.
    ///
    /// No adjacency check is made; see [`Path::is_contiguous`].
    pub fn new(cells: Vec<Cell>) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        Some(Self { cells })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells, endpoints included.  Always ≥ 1.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Number of moves: `len() - 1`.
    pub fn step_count(&self) -> usize {
        self.cells.len() - 1
    }

    /// `true` when start and goal coincide.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() == 1
    }

    /// `true` if every consecutive pair is orthogonally adjacent.
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    /// The cells after the start, i.e. the moves an agent standing on `start()`
    /// still has to make.
    pub fn into_steps(mut self) -> Vec<Cell> {
        self.cells.remove(0);
        self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// One `x:y` line per cell.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            writeln!(f, "{cell}")?;
        }
        Ok(())
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable pathfinding engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: the scheduler may run searches for
/// several agents at once on Rayon workers, all sharing one engine.
pub trait Pathfinder: Send + Sync {
    /// Compute a path from `start` to `goal` on `grid`.
    ///
    /// Returns `None` if the goal is unreachable, including when either
    /// endpoint is out of bounds or blocked.  `start == goal` on a walkable
    /// cell yields the single-cell path.
    fn find_path(&self, grid: &GridMap, start: Cell, goal: Cell) -> Option<Path>;
}

// ── SearchStats / SearchOutcome ───────────────────────────────────────────────

/// Counters from a single [`AStarPathfinder::search`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells in the order they were closed.  The goal is never expanded: the
    /// search stops when it is popped.
    pub expanded: Vec<Cell>,
    /// Frontier admissions, including the start.
    pub pushed: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
}

/// A path (or `None`) plus the bookkeeping that produced it.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub path:  Option<Path>,
    pub stats: SearchStats,
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// A* over a 4-connected unit-cost grid.
///
/// Neighbours are relaxed left, up, right, down.  The frontier pops the lowest
/// `f = g + h`; ties go to the lower `h` (the entry closer to the goal), then
/// to the earlier admission.  Identical inputs therefore always produce
/// identical paths.
#[derive(Clone, Debug, Default)]
pub struct AStarPathfinder<H: Heuristic = Manhattan> {
    heuristic: H,
}

impl AStarPathfinder<Manhattan> {
    pub fn new() -> Self {
        Self { heuristic: Manhattan }
    }
}

impl<H: Heuristic> AStarPathfinder<H> {
    pub fn with_heuristic(heuristic: H) -> Self {
        Self { heuristic }
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    /// Like [`Pathfinder::find_path`] but also returns [`SearchStats`],
    /// including the full expansion order.
    pub fn search(&self, grid: &GridMap, start: Cell, goal: Cell) -> SearchOutcome {
        let mut stats = SearchStats::default();
        let path = self.run(grid, start, goal, &mut stats, true);
        SearchOutcome { path, stats }
    }

    fn run(
        &self,
        grid:   &GridMap,
        start:  Cell,
        goal:   Cell,
        stats:  &mut SearchStats,
        trace:  bool,
    ) -> Option<Path> {
        if !grid.is_walkable_cell(start) || !grid.is_walkable_cell(goal) {
            return None;
        }
        if start == goal {
            return Some(Path { cells: vec![start] });
        }

        let mut arena:  Vec<SearchRecord> = Vec::new();
        let mut best_g: CellMap<u32>      = CellMap::default();
        let mut closed: CellSet           = CellSet::default();
        // Min-heap: (f, h, arena index). Reverse makes BinaryHeap (max) behave as min-heap.
        let mut frontier: BinaryHeap<Reverse<(u32, u32, usize)>> = BinaryHeap::new();

        let root = SearchRecord { cell: start, g: 0, h: self.heuristic.estimate(start, goal), parent: None };
        frontier.push(Reverse(root.key(0)));
        arena.push(root);
        best_g.insert(start, 0);
        stats.pushed = 1;
        stats.max_frontier = 1;

        while let Some(Reverse((_, _, idx))) = frontier.pop() {
            let SearchRecord { cell, g, .. } = arena[idx];

            // Superseded admission: the cell was closed via a cheaper record,
            // or a cheaper record is still waiting in the frontier.
            if closed.contains(&cell) || best_g.get(&cell).is_some_and(|&best| g > best) {
                continue;
            }

            if cell == goal {
                return Some(reconstruct(&arena, idx));
            }

            closed.insert(cell);
            if trace {
                stats.expanded.push(cell);
            }

            for neighbour in grid.neighbours(cell) {
                if closed.contains(&neighbour) {
                    continue;
                }
                let tentative = g + 1;
                if best_g.get(&neighbour).is_some_and(|&best| tentative >= best) {
                    continue;
                }
                best_g.insert(neighbour, tentative);

                let record = SearchRecord {
                    cell:   neighbour,
                    g:      tentative,
                    h:      self.heuristic.estimate(neighbour, goal),
                    parent: Some(idx),
                };
                frontier.push(Reverse(record.key(arena.len())));
                arena.push(record);
                stats.pushed += 1;
            }
            stats.max_frontier = stats.max_frontier.max(frontier.len());
        }

        None
    }
}

impl<H: Heuristic> Pathfinder for AStarPathfinder<H> {
    fn find_path(&self, grid: &GridMap, start: Cell, goal: Cell) -> Option<Path> {
        let mut stats = SearchStats::default();
        self.run(grid, start, goal, &mut stats, false)
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// One frontier admission.
#[derive(Copy, Clone, Debug)]
struct SearchRecord {
    cell:   Cell,
    g:      u32,
    h:      u32,
    parent: Option<usize>,
}

impl SearchRecord {
    #[inline]
    fn f(&self) -> u32 {
        self.g.saturating_add(self.h)
    }

    /// Frontier key for this record stored at arena index `idx`.
    #[inline]
    fn key(&self, idx: usize) -> (u32, u32, usize) {
        (self.f(), self.h, idx)
    }
}

fn reconstruct(arena: &[SearchRecord], goal_idx: usize) -> Path {
    let mut cells = Vec::with_capacity(arena[goal_idx].g as usize + 1);
    let mut cur = Some(goal_idx);
    while let Some(idx) = cur {
        cells.push(arena[idx].cell);
        cur = arena[idx].parent;
    }
    cells.reverse();
    Path { cells }
}
