//! Immutable occupancy grid and builder.
//!
//! # Data layout
//!
//! Occupancy is a single row-major `Vec<bool>` (`true` = blocked):
//!
//! ```text
//! blocked[y * width + x]
//! ```
//!
//! `GridMap` has no interior mutability and no mutating methods, so it is
//! `Send + Sync` and can be shared behind an `Arc` by every concurrent search.

use gn_core::Cell;

use crate::{GridError, GridResult};

// ── GridMap ───────────────────────────────────────────────────────────────────

/// A `width × height` occupancy grid.
///
/// Do not construct field-by-field; use [`GridMap::new`],
/// [`GridMap::from_rows`], [`GridMapBuilder`] or one of the loaders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    width:   usize,
    height:  usize,
    blocked: Vec<bool>,
}

impl GridMap {
    /// Build a grid from a row-major occupancy vector.
    ///
    /// Fails if either dimension is zero, too large for an `i32` coordinate,
    /// or `blocked.len() != width * height`.
    pub fn new(width: usize, height: usize, blocked: Vec<bool>) -> GridResult<Self> {
        let expected = check_dimensions(width, height)?;
        if blocked.len() != expected {
            return Err(GridError::CellCountMismatch { expected, got: blocked.len() });
        }
        Ok(Self { width, height, blocked })
    }

    /// Build a grid from integer rows, top to bottom (`1` = blocked,
    /// `0` = walkable).  Rows must all have the same length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> GridResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let cells = check_dimensions(width, height)?;

        let mut blocked = Vec::with_capacity(cells);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(GridError::RaggedRow { row, expected: width, got: values.len() });
            }
            for (col, &v) in values.iter().enumerate() {
                match v {
                    0 => blocked.push(false),
                    1 => blocked.push(true),
                    other => {
                        return Err(GridError::InvalidCell { row, col, value: other.to_string() });
                    }
                }
            }
        }
        Self::new(width, height, blocked)
    }

    /// An obstacle-free grid.
    pub fn open(width: usize, height: usize) -> GridResult<Self> {
        Self::new(width, height, open_cells(width, height)?)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (walkable or not).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if `(x, y)` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.in_bounds(cell.x, cell.y)
    }

    /// `false` for out-of-bounds or blocked coordinates, `true` otherwise.
    #[inline]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && !self.blocked[y as usize * self.width + x as usize]
    }

    #[inline]
    pub fn is_walkable_cell(&self, cell: Cell) -> bool {
        self.is_walkable(cell.x, cell.y)
    }

    /// Walkable orthogonal neighbours of `cell` in left, up, right, down order.
    #[inline]
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neighbours().filter(move |n| self.is_walkable_cell(*n))
    }

    pub fn walkable_count(&self) -> usize {
        self.blocked.iter().filter(|b| !**b).count()
    }

    /// All walkable cells in row-major order.
    pub fn walkable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width;
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, b)| !**b)
            .map(move |(i, _)| Cell::new((i % width) as i32, (i / width) as i32))
    }
}

/// Validate `width × height` and return its cell count.
fn check_dimensions(width: usize, height: usize) -> GridResult<usize> {
    if width == 0 || height == 0 {
        return Err(GridError::EmptyGrid { width, height });
    }
    for dim in [width, height] {
        if i32::try_from(dim).is_err() {
            return Err(GridError::TooLarge(dim));
        }
    }
    width.checked_mul(height).ok_or(GridError::TooManyCells { width, height })
}

/// A walkable occupancy vector, validated before anything is allocated.
fn open_cells(width: usize, height: usize) -> GridResult<Vec<bool>> {
    let cells = check_dimensions(width, height)?;
    let mut blocked = Vec::new();
    blocked
        .try_reserve_exact(cells)
        .map_err(|_| GridError::TooManyCells { width, height })?;
    blocked.resize(cells, false);
    Ok(blocked)
}

// ── GridMapBuilder ────────────────────────────────────────────────────────────

/// Incremental grid construction, starting fully walkable.
///
/// Out-of-bounds `block` calls are ignored so obstacle templates can be
/// stamped partially over an edge.  Invalid dimensions are reported by
/// [`build`][Self::build].
pub struct GridMapBuilder {
    width:   usize,
    height:  usize,
    blocked: GridResult<Vec<bool>>,
}

impl GridMapBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, blocked: open_cells(width, height) }
    }

    /// Mark `(x, y)` blocked.
    pub fn block(mut self, x: i32, y: i32) -> Self {
        self.set(x, y, true);
        self
    }

    /// Mark every cell in the inclusive rectangle `(x0, y0)..=(x1, y1)` blocked.
    pub fn block_rect(mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                self.set(x, y, true);
            }
        }
        self
    }

    /// Clear a previously blocked cell.
    pub fn open(mut self, x: i32, y: i32) -> Self {
        self.set(x, y, false);
        self
    }

    fn set(&mut self, x: i32, y: i32, blocked: bool) {
        let Ok(cells) = &mut self.blocked else {
            return;
        };
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            cells[y as usize * self.width + x as usize] = blocked;
        }
    }

    /// Validate dimensions and produce the immutable [`GridMap`].
    pub fn build(self) -> GridResult<GridMap> {
        GridMap::new(self.width, self.height, self.blocked?)
    }
}
