//! Heuristic loader for the cantonal municipality spreadsheet.
//!
//! The published Steuerfuss spreadsheet carries a free-form preamble and no
//! fixed schema, so the loader works from heuristics: it assumes two
//! metadata rows before the header, takes the first textual column as the
//! municipality name and the first numeric column with plausible percent
//! values as the Steuerfuss, and falls back to fixed positions when
//! detection fails.
//!
//! Detection order matters: the name scan runs before the rate scan, both
//! left to right. Swapping them changes outcomes on ambiguous sheets.

use std::path::Path;

use steuer_core::models::MunicipalityTable;
use thiserror::Error;
use tracing::{debug, info};

use crate::sheet::{Cell, Sheet, SheetError};

/// Header row index when the sheet carries the usual two-row preamble.
const PREAMBLE_HEADER_ROW: usize = 2;

/// Rate-column heuristic: tax multipliers are percentages well under this.
const STEUERFUSS_CEILING: f64 = 2000.0;

/// Municipality names in the cantonal export carry this suffix.
const CANTON_SUFFIX: &str = " (SO)";

const EMPTY_CELL: Cell = Cell::Empty;

/// Errors from turning a sheet into a municipality table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The sheet is too small to hold a preamble, header, and data.
    #[error("sheet has {0} rows; expected at least 4")]
    TooFewRows(usize),

    /// Neither heuristic nor positional fallback could place the columns.
    #[error("could not detect municipality or Steuerfuss column")]
    ColumnsNotDetected,

    /// Detection succeeded but no row yielded a usable name/rate pair.
    #[error("no valid municipality rows found")]
    EmptyResult,
}

/// Errors from the file-level convenience loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Read(#[from] SheetError),

    #[error(transparent)]
    Table(#[from] TableError),
}

fn cell_at<'a>(
    row: &'a [Cell],
    column: usize,
) -> &'a Cell {
    row.get(column).unwrap_or(&EMPTY_CELL)
}

/// Cleaned header labels: blanks become positional `col{i}` placeholders.
fn header_labels(
    header_row: &[Cell],
    column_count: usize,
) -> Vec<String> {
    (0..column_count)
        .map(|i| {
            cell_at(header_row, i)
                .to_text()
                .unwrap_or_else(|| format!("col{i}"))
        })
        .collect()
}

/// First column whose non-missing values are all textual, with at least one
/// non-blank value after trimming.
fn detect_name_column(
    data_rows: &[Vec<Cell>],
    column_count: usize,
) -> Option<usize> {
    (0..column_count).find(|&column| {
        let mut saw_nonblank = false;
        for row in data_rows {
            match cell_at(row, column) {
                Cell::Empty => {}
                Cell::Text(s) => saw_nonblank |= !s.trim().is_empty(),
                Cell::Number(_) => return false,
            }
        }
        saw_nonblank
    })
}

/// First column with numeric-coercible values whose maximum stays below the
/// Steuerfuss ceiling.
fn detect_rate_column(
    data_rows: &[Vec<Cell>],
    column_count: usize,
) -> Option<usize> {
    (0..column_count).find(|&column| {
        let mut max: Option<f64> = None;
        for row in data_rows {
            if let Some(value) = cell_at(row, column).as_number() {
                max = Some(max.map_or(value, |m| m.max(value)));
            }
        }
        max.is_some_and(|m| m < STEUERFUSS_CEILING)
    })
}

fn strip_canton_suffix(name: &str) -> String {
    match name.strip_suffix(CANTON_SUFFIX) {
        Some(stripped) => stripped.trim().to_string(),
        None => name.to_string(),
    }
}

/// Builds a [`MunicipalityTable`] from a raw grid of cells.
///
/// See the module documentation for the detection heuristics. Rows with a
/// missing name or a rate that cannot be coerced to a number are skipped;
/// the rate is truncated (not rounded) to an integer percent.
///
/// # Errors
///
/// * [`TableError::TooFewRows`] — fewer than 4 rows.
/// * [`TableError::ColumnsNotDetected`] — no columns found and fewer than 3
///   columns available for the positional fallback.
/// * [`TableError::EmptyResult`] — no data row survived extraction.
pub fn build_table(rows: &[Vec<Cell>]) -> Result<MunicipalityTable, TableError> {
    if rows.len() < 4 {
        return Err(TableError::TooFewRows(rows.len()));
    }
    let header_index = if rows.len() > 3 { PREAMBLE_HEADER_ROW } else { 0 };
    let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let labels = header_labels(&rows[header_index], column_count);
    let data_rows = &rows[header_index + 1..];

    let name_column = detect_name_column(data_rows, column_count);
    let rate_column = detect_rate_column(data_rows, column_count);
    let (name_column, rate_column) = match (name_column, rate_column) {
        (Some(name), Some(rate)) => (name, rate),
        // Positional fallback: name in the first column, rate in the third.
        _ if column_count >= 3 => (0, 2),
        _ => return Err(TableError::ColumnsNotDetected),
    };
    debug!(
        name_column = %labels[name_column],
        rate_column = %labels[rate_column],
        "columns selected"
    );

    let mut entries = Vec::new();
    for row in data_rows {
        let Some(name) = cell_at(row, name_column).to_text() else {
            continue;
        };
        let Some(rate) = cell_at(row, rate_column).as_number() else {
            continue;
        };
        entries.push((strip_canton_suffix(&name), rate as i32));
    }

    if entries.is_empty() {
        return Err(TableError::EmptyResult);
    }
    Ok(MunicipalityTable::from_entries(entries))
}

/// Reads a spreadsheet file and builds the municipality table.
///
/// Files with a `.csv` extension go through the CSV reader; everything else
/// is treated as a workbook.
pub fn load_path(path: &Path) -> Result<MunicipalityTable, LoadError> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let sheet = if is_csv {
        Sheet::from_csv_path(path)?
    } else {
        Sheet::from_workbook_path(path)?
    };

    let table = build_table(&sheet.rows)?;
    info!(
        path = %path.display(),
        rows = sheet.rows.len(),
        municipalities = table.len(),
        "municipality table loaded"
    );
    Ok(table)
}
