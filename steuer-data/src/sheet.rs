//! Untyped tabular sheet model.
//!
//! Both supported file formats (XLSX via `calamine`, CSV via the `csv`
//! crate) are flattened into the same grid of [`Cell`]s so the column
//! detection heuristics in [`crate::loader`] are format-agnostic. Files are
//! read end-to-end into memory before any parsing happens.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use thiserror::Error;

/// Errors that can occur while reading a sheet from disk.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook contains no worksheets")]
    NoWorksheet,
}

impl From<calamine::Error> for SheetError {
    fn from(err: calamine::Error) -> Self {
        SheetError::Workbook(err.to_string())
    }
}

/// One cell of the input grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Numeric coercion: numbers pass through, text is parsed if possible.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Empty => None,
        }
    }

    /// Stringified, trimmed cell content; `None` for empty cells.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.trim().to_string()),
            Cell::Number(n) => Some(format!("{n}")),
        }
    }

    fn from_workbook_cell(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                Cell::Text(s.clone())
            }
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Number(f64::from(*b)),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        }
    }

    fn from_csv_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Empty
        } else if let Ok(n) = field.parse::<f64>() {
            Cell::Number(n)
        } else {
            Cell::Text(field.to_string())
        }
    }
}

/// A loaded grid of cells, rows in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Reads the first worksheet of an XLSX/XLS workbook.
    pub fn from_workbook_path(path: &Path) -> Result<Self, SheetError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SheetError::NoWorksheet)??;

        let rows = range
            .rows()
            .map(|row| row.iter().map(Cell::from_workbook_cell).collect())
            .collect();
        Ok(Self { rows })
    }

    /// Reads a headerless CSV export into the same grid shape.
    ///
    /// Rows may have differing widths; values are trimmed and classified as
    /// numbers where they parse as such.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, SheetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(Cell::from_csv_field).collect());
        }
        Ok(Self { rows })
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, SheetError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn csv_fields_are_classified() {
        let csv = "Gemeinde,Steuerfuss\nAeschi,110\n,\n";

        let sheet = Sheet::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[0][0], Cell::Text("Gemeinde".to_string()));
        assert_eq!(sheet.rows[1][1], Cell::Number(110.0));
        assert_eq!(sheet.rows[2], vec![Cell::Empty, Cell::Empty]);
    }

    #[test]
    fn csv_rows_may_have_different_widths() {
        let csv = "a,b,c\nd\n";

        let sheet = Sheet::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(sheet.rows[0].len(), 3);
        assert_eq!(sheet.rows[1].len(), 1);
    }

    #[test]
    fn as_number_coerces_numeric_text() {
        assert_eq!(Cell::Text("110.5".to_string()).as_number(), Some(110.5));
        assert_eq!(Cell::Text("Aeschi".to_string()).as_number(), None);
        assert_eq!(Cell::Number(3.0).as_number(), Some(3.0));
        assert_eq!(Cell::Empty.as_number(), None);
    }

    #[test]
    fn to_text_stringifies_and_trims() {
        assert_eq!(
            Cell::Text("  Aeschi ".to_string()).to_text(),
            Some("Aeschi".to_string())
        );
        assert_eq!(Cell::Number(110.0).to_text(), Some("110".to_string()));
        assert_eq!(Cell::Empty.to_text(), None);
    }
}
