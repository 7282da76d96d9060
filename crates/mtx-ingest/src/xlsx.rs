//! XLSX reading via calamine.

use std::path::Path;

use calamine::{DataType, Reader, Xlsx};

use crate::error::{IngestError, Result};
use crate::table::{RawTable, table_from_rows};

/// Read the first worksheet of an `.xlsx` workbook into a [`RawTable`].
pub fn read_xlsx_table(path: &Path) -> Result<RawTable> {
    let mut workbook: Xlsx<_> =
        calamine::open_workbook(path).map_err(|source| IngestError::Xlsx {
            path: path.to_path_buf(),
            source,
        })?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range(&sheet)
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|source| IngestError::Xlsx {
            path: path.to_path_buf(),
            source,
        })?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for row in range.rows() {
        let cells: Vec<String> = row.iter().map(cell_to_string).collect();
        if cells.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(cells);
    }

    Ok(table_from_rows(raw_rows, path))
}

/// Render a worksheet cell as trimmed text.
///
/// Whole-number floats print without the trailing `.0` so that identifier
/// and cycle columns entered as numbers survive as clean integer text.
fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.trim().trim_matches('\u{feff}').to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Float(value) | DataType::DateTime(value) => format_float(*value),
        DataType::Bool(value) => {
            if *value {
                "1".to_string()
            } else {
                "0".to_string()
            }
        }
        DataType::Error(_) | DataType::Empty => String::new(),
        #[allow(unreachable_patterns)]
        other => other.to_string().trim().to_string(),
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_lose_decimal_point() {
        assert_eq!(cell_to_string(&DataType::Float(3.0)), "3");
        assert_eq!(cell_to_string(&DataType::Float(3.5)), "3.5");
        assert_eq!(cell_to_string(&DataType::Int(7)), "7");
    }

    #[test]
    fn text_cells_are_trimmed() {
        assert_eq!(
            cell_to_string(&DataType::String("  2 - moderada ".to_string())),
            "2 - moderada"
        );
        assert_eq!(cell_to_string(&DataType::Empty), "");
    }
}
