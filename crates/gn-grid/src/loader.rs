//! Grid loaders.
//!
//! # Formats
//!
//! **Digit rows** ([`parse_grid_str`]): one line per row, one character per
//! cell, `1` blocked and `0` walkable.  Blank lines and surrounding whitespace
//! are ignored.
//!
//! ```text
//! 11111
//! 10111
//! 10001
//! ```
//!
//! **CSV** ([`load_grid_csv`], [`load_grid_reader`]): headerless, one record
//! per row, one field per cell.
//!
//! ```csv
//! 1,1,1,1,1
//! 1,0,1,1,1
//! 1,0,0,0,1
//! ```

use std::io::Read;
use std::path::Path;

use crate::{GridError, GridMap, GridResult};

/// Parse a digit-row grid.
pub fn parse_grid_str(text: &str) -> GridResult<GridMap> {
    let mut rows: Vec<Vec<u8>> = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let row = rows.len();
        let cells = line
            .chars()
            .enumerate()
            .map(|(col, ch)| parse_cell(row, col, &ch.to_string()))
            .collect::<GridResult<Vec<u8>>>()?;
        rows.push(cells);
    }
    GridMap::from_rows(&rows)
}

/// Load a headerless CSV occupancy grid from `path`.
pub fn load_grid_csv(path: &Path) -> GridResult<GridMap> {
    let file = std::fs::File::open(path).map_err(GridError::Io)?;
    load_grid_reader(file)
}

/// Like [`load_grid_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for grids embedded in a
/// larger asset bundle.
pub fn load_grid_reader<R: Read>(reader: R) -> GridResult<GridMap> {
    // `flexible` so ragged rows surface as GridError::RaggedRow instead of an
    // opaque csv error.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<u8>> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row = rows.len();
        let cells = record
            .iter()
            .enumerate()
            .map(|(col, field)| parse_cell(row, col, field))
            .collect::<GridResult<Vec<u8>>>()?;
        rows.push(cells);
    }
    GridMap::from_rows(&rows)
}

fn parse_cell(row: usize, col: usize, field: &str) -> GridResult<u8> {
    match field {
        "0" => Ok(0),
        "1" => Ok(1),
        other => Err(GridError::InvalidCell { row, col, value: other.to_string() }),
    }
}
