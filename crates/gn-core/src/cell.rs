//! Grid coordinate type.
//!
//! A `Cell` is the identity key for all search bookkeeping.  It carries no
//! cost or heuristic data: two cells are equal iff their coordinates match.
//! `x` is the column and `y` the row, both signed so that neighbour offsets
//! may step outside the grid without wrapping; bounds checks live in
//! `gn-grid`.

use std::fmt;

/// 4-directional neighbour offsets in expansion order: left, up, right, down.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// A grid coordinate `(x, y)`: column, row.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `|dx| + |dy|`.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if `other` differs by exactly one unit along exactly one axis.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// The cell displaced by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours in [`NEIGHBOUR_OFFSETS`] order.  No
    /// bounds or walkability filtering.
    #[inline]
    pub fn neighbours(self) -> impl Iterator<Item = Cell> {
        NEIGHBOUR_OFFSETS.into_iter().map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

/// Renders as `x:y`, the format the demonstration CLI prints.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}
