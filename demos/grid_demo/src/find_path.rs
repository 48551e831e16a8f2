//! find_path: one A* search on the demonstration grid.
//!
//! Prints the path from (1, 1) to (4, 4) as one `x:y` line per cell, or
//! `No path found.` when the goal cannot be reached.  Exits 0 either way.
//!
//! ```text
//! find_path [--grid <file.csv>] [--from x,y] [--to x,y]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::debug;

use gn_core::Cell;
use gn_grid::{AStarPathfinder, GridMap, Pathfinder, load_grid_csv, parse_grid_str};

// ── Demonstration grid ────────────────────────────────────────────────────────

// 1 = blocked.  (1, 1) reaches (4, 4) through the open bottom-right corner.
const DEMO_GRID: &str = "\
11111
10111
10111
10001
10100";

const DEMO_FROM: Cell = Cell { x: 1, y: 1 };
const DEMO_TO:   Cell = Cell { x: 4, y: 4 };

// ── Arguments ─────────────────────────────────────────────────────────────────

struct Options {
    grid: Option<PathBuf>,
    from: Cell,
    to:   Cell,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self> {
        let mut opts = Options { grid: None, from: DEMO_FROM, to: DEMO_TO };
        let mut it = args.iter();
        while let Some(flag) = it.next() {
            let mut value = || it.next().with_context(|| format!("{flag} needs a value"));
            match flag.as_str() {
                "--grid" => opts.grid = Some(PathBuf::from(value()?)),
                "--from" => opts.from = parse_cell(value()?)?,
                "--to"   => opts.to = parse_cell(value()?)?,
                other    => bail!("unknown argument {other:?} (expected --grid, --from or --to)"),
            }
        }
        Ok(opts)
    }
}

fn parse_cell(text: &str) -> Result<Cell> {
    let (x, y) = text
        .split_once(',')
        .with_context(|| format!("expected x,y but got {text:?}"))?;
    Ok(Cell::new(
        x.trim().parse().with_context(|| format!("bad x in {text:?}"))?,
        y.trim().parse().with_context(|| format!("bad y in {text:?}"))?,
    ))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the path.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = Options::parse(&args)?;

    let grid: GridMap = match &opts.grid {
        Some(path) => load_grid_csv(path).with_context(|| format!("loading grid {}", path.display()))?,
        None => parse_grid_str(DEMO_GRID)?,
    };
    debug!(width = grid.width(), height = grid.height(), from = %opts.from, to = %opts.to, "searching");

    match AStarPathfinder::new().find_path(&grid, opts.from, opts.to) {
        Some(path) => print!("{path}"),
        None => println!("No path found."),
    }
    Ok(())
}
