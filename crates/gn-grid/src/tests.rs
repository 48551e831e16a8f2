//! Unit tests for gn-grid.
//!
//! All tests use hand-crafted or generated grids; no asset files.

#[cfg(test)]
mod helpers {
    use std::collections::VecDeque;

    use gn_core::Cell;

    use crate::{GridMap, parse_grid_str};

    /// The fixed demonstration grid (1 = blocked), rows top to bottom.
    ///
    /// ```text
    /// 11111
    /// 10111
    /// 10111
    /// 10001
    /// 10100
    /// ```
    pub fn demo_grid() -> GridMap {
        parse_grid_str("11111\n10111\n10111\n10001\n10100").unwrap()
    }

    /// Same as `demo_grid` but with the bottom-right cell blocked, which
    /// walls off (4, 4) entirely.
    pub fn demo_grid_goal_blocked() -> GridMap {
        parse_grid_str("11111\n10111\n10111\n10001\n10101").unwrap()
    }

    /// Ground-truth breadth-first shortest step count, independent of the
    /// A* machinery.
    pub fn bfs_steps(grid: &GridMap, start: Cell, goal: Cell) -> Option<usize> {
        if !grid.is_walkable_cell(start) || !grid.is_walkable_cell(goal) {
            return None;
        }
        let w = grid.width();
        let idx = |c: Cell| c.y as usize * w + c.x as usize;
        let mut dist = vec![usize::MAX; grid.cell_count()];
        let mut queue = VecDeque::new();
        dist[idx(start)] = 0;
        queue.push_back(start);
        while let Some(cur) = queue.pop_front() {
            if cur == goal {
                return Some(dist[idx(cur)]);
            }
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let n = Cell::new(cur.x + dx, cur.y + dy);
                if grid.is_walkable_cell(n) && dist[idx(n)] == usize::MAX {
                    dist[idx(n)] = dist[idx(cur)] + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    /// Asserts every structural property a returned path must have.
    pub fn assert_valid_path(grid: &GridMap, path: &crate::Path, start: Cell, goal: Cell) {
        assert_eq!(path.start(), start);
        assert_eq!(path.goal(), goal);
        assert!(path.is_contiguous(), "non-adjacent step in {:?}", path.cells());
        for c in path {
            assert!(grid.is_walkable_cell(*c), "blocked cell {c} on path");
        }
    }
}

// ── GridMap construction & queries ────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use gn_core::Cell;

    use crate::{GridError, GridMap, GridMapBuilder};

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(GridMap::new(0, 3, vec![]), Err(GridError::EmptyGrid { .. })));
        assert!(matches!(GridMap::open(3, 0), Err(GridError::EmptyGrid { .. })));
        let no_rows: [Vec<u8>; 0] = [];
        assert!(matches!(GridMap::from_rows(&no_rows), Err(GridError::EmptyGrid { .. })));
    }

    #[test]
    fn oversized_dimensions_rejected_before_allocating() {
        assert!(matches!(GridMap::open(usize::MAX, 2), Err(GridError::TooLarge(usize::MAX))));
        assert!(matches!(
            GridMapBuilder::new(usize::MAX, 2).block(0, 0).build(),
            Err(GridError::TooLarge(usize::MAX))
        ));
        assert!(matches!(GridMapBuilder::new(0, 5).build(), Err(GridError::EmptyGrid { .. })));

        // Each side fits an i32, but the cell count cannot be allocated.
        let side = i32::MAX as usize;
        assert!(matches!(GridMap::open(side, side), Err(GridError::TooManyCells { .. })));
    }

    #[test]
    fn cell_count_mismatch_rejected() {
        let err = GridMap::new(2, 2, vec![false; 3]).unwrap_err();
        assert!(matches!(err, GridError::CellCountMismatch { expected: 4, got: 3 }));
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows: Vec<Vec<u8>> = vec![vec![0, 0, 0], vec![0, 0]];
        let err = GridMap::from_rows(&rows).unwrap_err();
        assert!(matches!(err, GridError::RaggedRow { row: 1, expected: 3, got: 2 }));
    }

    #[test]
    fn non_binary_value_rejected() {
        let rows: Vec<Vec<u8>> = vec![vec![0, 2]];
        assert!(matches!(GridMap::from_rows(&rows), Err(GridError::InvalidCell { col: 1, .. })));
    }

    #[test]
    fn out_of_bounds_is_not_walkable() {
        let g = GridMap::open(3, 2).unwrap();
        assert!(g.is_walkable(0, 0));
        assert!(g.is_walkable(2, 1));
        assert!(!g.is_walkable(-1, 0));
        assert!(!g.is_walkable(0, -1));
        assert!(!g.is_walkable(3, 0));
        assert!(!g.is_walkable(0, 2));
    }

    #[test]
    fn rows_are_y_columns_are_x() {
        // Row 0 has a wall in column 2.
        let g = GridMap::from_rows(&[vec![0u8, 0, 1], vec![0, 0, 0]]).unwrap();
        assert!(!g.is_walkable(2, 0));
        assert!(g.is_walkable(2, 1));
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
    }

    #[test]
    fn builder_blocks_and_clips() {
        let g = GridMapBuilder::new(4, 4)
            .block_rect(1, 1, 2, 2)
            .block(10, 10) // ignored
            .open(2, 2)
            .build()
            .unwrap();
        assert!(!g.is_walkable(1, 1));
        assert!(!g.is_walkable(2, 1));
        assert!(!g.is_walkable(1, 2));
        assert!(g.is_walkable(2, 2));
        assert_eq!(g.walkable_count(), 13);
    }

    #[test]
    fn neighbours_filter_walls_and_bounds() {
        let g = GridMap::from_rows(&[vec![0u8, 1], vec![0, 0]]).unwrap();
        let n: Vec<_> = g.neighbours(Cell::new(0, 0)).collect();
        // left & up out of bounds, right blocked → only down.
        assert_eq!(n, vec![Cell::new(0, 1)]);
    }

    #[test]
    fn walkable_cells_row_major() {
        let g = GridMap::from_rows(&[vec![1u8, 0], vec![0, 1]]).unwrap();
        let cells: Vec<_> = g.walkable_cells().collect();
        assert_eq!(cells, vec![Cell::new(1, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn grid_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GridMap>();
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use crate::{GridError, load_grid_csv, load_grid_reader, parse_grid_str};

    #[test]
    fn digit_rows_ignore_blank_lines_and_indent() {
        let g = parse_grid_str("\n   010\n  000 \n\n").unwrap();
        assert_eq!((g.width(), g.height()), (3, 2));
        assert!(!g.is_walkable(1, 0));
    }

    #[test]
    fn digit_rows_reject_other_chars() {
        let err = parse_grid_str("01\n0x").unwrap_err();
        assert!(matches!(err, GridError::InvalidCell { row: 1, col: 1, .. }));
    }

    #[test]
    fn empty_text_is_empty_grid() {
        assert!(matches!(parse_grid_str("  \n"), Err(GridError::EmptyGrid { .. })));
    }

    #[test]
    fn csv_reader() {
        let g = load_grid_reader(Cursor::new("1, 0, 1\n0,0,0\n")).unwrap();
        assert_eq!((g.width(), g.height()), (3, 2));
        assert!(g.is_walkable(1, 0));
        assert!(!g.is_walkable(2, 0));
    }

    #[test]
    fn csv_ragged_row() {
        let err = load_grid_reader(Cursor::new("0,0,0\n0,0\n")).unwrap_err();
        assert!(matches!(err, GridError::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn csv_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0,1").unwrap();
        writeln!(file, "0,0").unwrap();
        let g = load_grid_csv(file.path()).unwrap();
        assert_eq!(g.walkable_count(), 3);
    }

    #[test]
    fn csv_missing_file_is_io_error() {
        let err = load_grid_csv(std::path::Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, GridError::Io(_)));
    }
}

// ── Heuristics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod heuristic {
    use gn_core::Cell;

    use crate::{Heuristic, Manhattan, ZeroHeuristic};

    #[test]
    fn manhattan() {
        assert_eq!(Manhattan.estimate(Cell::new(1, 1), Cell::new(4, 4)), 6);
    }

    #[test]
    fn zero() {
        assert_eq!(ZeroHeuristic.estimate(Cell::new(0, 0), Cell::new(9, 9)), 0);
    }

    #[test]
    fn closure_heuristic() {
        let h = |a: Cell, b: Cell| a.x.abs_diff(b.x).max(a.y.abs_diff(b.y));
        assert_eq!(h.estimate(Cell::new(0, 0), Cell::new(3, 1)), 3);
    }
}

// ── A* search ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use std::collections::HashSet;

    use gn_core::Cell;

    use super::helpers::{assert_valid_path, bfs_steps, demo_grid, demo_grid_goal_blocked};
    use crate::{AStarPathfinder, GridMap, GridMapBuilder, Path, Pathfinder, ZeroHeuristic};

    fn cells(v: &[(i32, i32)]) -> Vec<Cell> {
        v.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn same_start_and_goal_is_single_cell() {
        let g = GridMap::open(4, 4).unwrap();
        let astar = AStarPathfinder::new();
        for c in g.walkable_cells() {
            let p = astar.find_path(&g, c, c).unwrap();
            assert_eq!(p.cells(), &[c]);
            assert!(p.is_trivial());
            assert_eq!(p.step_count(), 0);
        }
    }

    #[test]
    fn open_grid_length_is_manhattan() {
        let g = GridMap::open(7, 5).unwrap();
        let astar = AStarPathfinder::new();
        let pairs = [((0, 0), (6, 4)), ((6, 0), (0, 4)), ((3, 2), (3, 0)), ((5, 4), (1, 4))];
        for (a, b) in pairs {
            let (a, b) = (Cell::from(a), Cell::from(b));
            let p = astar.find_path(&g, a, b).unwrap();
            assert_eq!(p.step_count() as u32, a.manhattan(b), "{a} → {b}");
            assert_valid_path(&g, &p, a, b);
        }
    }

    #[test]
    fn demo_scenario_matches_bfs() {
        let g = demo_grid();
        let (start, goal) = (Cell::new(1, 1), Cell::new(4, 4));
        let p = AStarPathfinder::new().find_path(&g, start, goal).unwrap();
        assert_eq!(Some(p.step_count()), bfs_steps(&g, start, goal));
        assert_valid_path(&g, &p, start, goal);
    }

    #[test]
    fn demo_scenario_exact_cells() {
        // At (1,3) both (2,3) and (1,4) tie on f and h; (2,3) was admitted
        // first (right before down), so the path turns right.
        let g = demo_grid();
        let p = AStarPathfinder::new().find_path(&g, Cell::new(1, 1), Cell::new(4, 4)).unwrap();
        assert_eq!(
            p.cells(),
            cells(&[(1, 1), (1, 2), (1, 3), (2, 3), (3, 3), (3, 4), (4, 4)]).as_slice()
        );
        assert_eq!(p.to_string(), "1:1\n1:2\n1:3\n2:3\n3:3\n3:4\n4:4\n");
    }

    #[test]
    fn demo_scenario_with_blocked_goal_agrees_with_bfs() {
        let g = demo_grid_goal_blocked();
        let (start, goal) = (Cell::new(1, 1), Cell::new(4, 4));
        assert_eq!(bfs_steps(&g, start, goal), None);
        assert!(AStarPathfinder::new().find_path(&g, start, goal).is_none());
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        // Goal at (5,5) enclosed by a ring of walls.
        let g = GridMapBuilder::new(9, 9)
            .block_rect(4, 4, 6, 6)
            .open(5, 5)
            .build()
            .unwrap();
        let out = AStarPathfinder::new().search(&g, Cell::new(0, 0), Cell::new(5, 5));
        assert!(out.path.is_none());
        // Every reachable cell was expanded exactly once and then the search stopped.
        assert_eq!(out.stats.expanded.len(), g.walkable_count() - 1);
    }

    #[test]
    fn blocked_or_out_of_bounds_endpoints_are_unreachable() {
        let g = demo_grid();
        let astar = AStarPathfinder::new();
        assert!(astar.find_path(&g, Cell::new(0, 0), Cell::new(1, 1)).is_none());
        assert!(astar.find_path(&g, Cell::new(1, 1), Cell::new(0, 0)).is_none());
        assert!(astar.find_path(&g, Cell::new(-1, 1), Cell::new(1, 1)).is_none());
        assert!(astar.find_path(&g, Cell::new(1, 1), Cell::new(5, 1)).is_none());
        // Blocked cell as both endpoints is still "no path", not a trivial path.
        assert!(astar.find_path(&g, Cell::new(0, 0), Cell::new(0, 0)).is_none());
    }

    #[test]
    fn no_cell_expanded_twice() {
        let g = GridMapBuilder::new(12, 12)
            .block_rect(3, 0, 3, 9)
            .block_rect(7, 2, 7, 11)
            .build()
            .unwrap();
        let out = AStarPathfinder::new().search(&g, Cell::new(0, 0), Cell::new(11, 0));
        assert!(out.path.is_some());
        let unique: HashSet<_> = out.stats.expanded.iter().collect();
        assert_eq!(unique.len(), out.stats.expanded.len());
    }

    #[test]
    fn zero_heuristic_expands_no_fewer_and_finds_same_length() {
        let g = GridMapBuilder::new(10, 10).block_rect(2, 2, 7, 7).build().unwrap();
        let (a, b) = (Cell::new(0, 0), Cell::new(9, 9));
        let astar = AStarPathfinder::new().search(&g, a, b);
        let ucs = AStarPathfinder::with_heuristic(ZeroHeuristic).search(&g, a, b);
        let (pa, pu) = (astar.path.unwrap(), ucs.path.unwrap());
        assert_eq!(pa.step_count(), pu.step_count());
        assert!(ucs.stats.expanded.len() >= astar.stats.expanded.len());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let g = GridMapBuilder::new(15, 15)
            .block_rect(5, 1, 5, 13)
            .block_rect(9, 1, 9, 14)
            .build()
            .unwrap();
        let astar = AStarPathfinder::new();
        let first = astar.find_path(&g, Cell::new(0, 7), Cell::new(14, 7)).unwrap();
        for _ in 0..20 {
            assert_eq!(astar.find_path(&g, Cell::new(0, 7), Cell::new(14, 7)).unwrap(), first);
        }
    }

    #[test]
    fn detour_matches_bfs() {
        // U-shaped wall forces a long detour; greedy-by-h would get stuck inside.
        let g = GridMapBuilder::new(10, 10)
            .block_rect(2, 2, 7, 2)
            .block_rect(7, 2, 7, 7)
            .block_rect(2, 7, 7, 7)
            .build()
            .unwrap();
        let (a, b) = (Cell::new(4, 4), Cell::new(9, 4));
        let p = AStarPathfinder::new().find_path(&g, a, b).unwrap();
        assert_eq!(Some(p.step_count()), bfs_steps(&g, a, b));
        assert_valid_path(&g, &p, a, b);
    }

    #[test]
    fn path_helpers() {
        let p = Path::new(cells(&[(0, 0), (1, 0), (1, 1)])).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.step_count(), 2);
        assert_eq!(p.goal(), Cell::new(1, 1));
        assert_eq!(p.clone().into_steps(), cells(&[(1, 0), (1, 1)]));
        assert!(Path::new(vec![]).is_none());
        assert!(!Path::new(cells(&[(0, 0), (2, 0)])).unwrap().is_contiguous());
    }
}

// ── Properties on generated grids ─────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use std::collections::HashSet;

    use gn_core::Cell;
    use proptest::prelude::*;

    use super::helpers::{assert_valid_path, bfs_steps};
    use crate::{AStarPathfinder, GridMap, Pathfinder};

    /// A random grid up to 12×12 with roughly 30 % walls, plus two in-bounds
    /// cells (which may be blocked).
    fn grid_and_endpoints() -> impl Strategy<Value = (GridMap, Cell, Cell)> {
        (2usize..=12, 2usize..=12).prop_flat_map(|(w, h)| {
            (
                proptest::collection::vec(proptest::bool::weighted(0.3), w * h),
                0..w as i32,
                0..h as i32,
                0..w as i32,
                0..h as i32,
            )
                .prop_map(move |(blocked, sx, sy, gx, gy)| {
                    (
                        GridMap::new(w, h, blocked).unwrap(),
                        Cell::new(sx, sy),
                        Cell::new(gx, gy),
                    )
                })
        })
    }

    proptest! {
        #[test]
        fn astar_agrees_with_bfs((grid, start, goal) in grid_and_endpoints()) {
            let astar = AStarPathfinder::new();
            let path = astar.find_path(&grid, start, goal);
            let truth = bfs_steps(&grid, start, goal);
            prop_assert_eq!(path.as_ref().map(|p| p.step_count()), truth);
            if let Some(p) = path {
                assert_valid_path(&grid, &p, start, goal);
            }
        }

        #[test]
        fn expansions_are_unique((grid, start, goal) in grid_and_endpoints()) {
            let out = AStarPathfinder::new().search(&grid, start, goal);
            let unique: HashSet<_> = out.stats.expanded.iter().collect();
            prop_assert_eq!(unique.len(), out.stats.expanded.len());
            prop_assert!(out.stats.expanded.iter().all(|c| grid.is_walkable_cell(*c)));
        }

        #[test]
        fn search_is_deterministic((grid, start, goal) in grid_and_endpoints()) {
            let astar = AStarPathfinder::new();
            prop_assert_eq!(astar.find_path(&grid, start, goal), astar.find_path(&grid, start, goal));
        }
    }
}
