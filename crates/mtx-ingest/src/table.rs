//! In-memory raw table and CSV reading.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// A raw tabular file: one header row plus data rows, everything as text.
///
/// Cells are trimmed and BOM-stripped at read time; no other interpretation
/// happens here. Normalization and typing are the transform layer's job.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a header by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// All values of a column, missing cells as empty strings.
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// Rename a header in place. Returns true when the header existed.
    pub fn rename_header(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.headers[idx] = to.to_string();
                true
            }
            None => false,
        }
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|value| value.trim().is_empty())
}

/// Read a CSV file into a [`RawTable`].
///
/// Leading blank rows are skipped; the first non-blank row is the header.
/// Data rows are padded or truncated to the header width so that downstream
/// column access never goes out of bounds on ragged exports.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if is_blank_row(&row) {
            continue;
        }
        raw_rows.push(row);
    }

    Ok(table_from_rows(raw_rows, path))
}

/// Assemble a table from pre-read rows: first row is the header.
pub(crate) fn table_from_rows(raw_rows: Vec<Vec<String>>, path: &Path) -> RawTable {
    let mut raw_rows = raw_rows.into_iter();
    let Some(headers) = raw_rows.next() else {
        return RawTable::default();
    };
    let width = headers.len();

    let mut rows = Vec::new();
    for record in raw_rows {
        let mut row = Vec::with_capacity(width);
        for idx in 0..width {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        rows.push(row);
    }
    debug!(
        path = %path.display(),
        columns = width,
        rows = rows.len(),
        "read table"
    );
    RawTable { headers, rows }
}
