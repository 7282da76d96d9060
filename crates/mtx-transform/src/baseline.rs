//! Baseline demographics preparation.
//!
//! The baseline sheet is display-only context for the report: headers are
//! lowercased and trimmed (no transliteration, matching how these sheets are
//! keyed), an age column is derived from the birth date, directly identifying
//! columns are removed, and only the first rows are kept.

use chrono::NaiveDate;
use tracing::debug;

use mtx_ingest::RawTable;

/// Birth-date column of the baseline sheet, after lowercasing.
const BIRTH_DATE_COLUMN: &str = "data de nascimento";

/// Derived age column.
const AGE_COLUMN: &str = "idade";

/// Directly identifying columns stripped before display.
const REMOVED_COLUMNS: &[&str] = &[
    "nome",
    "sobrenome",
    "iniciais",
    "rg",
    "instituição",
    "registro hospitalar",
    "data de nascimento",
    "data tcle",
];

/// Number of baseline rows shown in reports.
pub const BASELINE_PREVIEW_ROWS: usize = 20;

/// An anonymized, display-ready baseline excerpt.
#[derive(Debug, Clone, Default)]
pub struct BaselineView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl BaselineView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Prepare the baseline excerpt. `today` is injected so age derivation is a
/// pure function of its inputs.
pub fn prepare_baseline(table: &RawTable, today: NaiveDate) -> BaselineView {
    if table.is_empty() {
        return BaselineView::default();
    }

    let headers: Vec<String> = table
        .headers
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect();

    let ages: Option<Vec<String>> = headers
        .iter()
        .position(|header| header == BIRTH_DATE_COLUMN)
        .map(|idx| {
            table
                .rows
                .iter()
                .map(|row| {
                    row.get(idx)
                        .and_then(|cell| parse_birth_date(cell))
                        .map(|birth| age_in_years(birth, today).to_string())
                        .unwrap_or_default()
                })
                .collect()
        });

    let kept: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| !REMOVED_COLUMNS.contains(&header.as_str()))
        .map(|(idx, _)| idx)
        .collect();
    debug!(
        kept = kept.len(),
        removed = headers.len() - kept.len(),
        "baseline columns filtered"
    );

    let mut view_headers: Vec<String> = kept.iter().map(|idx| headers[*idx].clone()).collect();
    if ages.is_some() {
        view_headers.push(AGE_COLUMN.to_string());
    }

    let mut view_rows = Vec::new();
    for (row_idx, row) in table.rows.iter().take(BASELINE_PREVIEW_ROWS).enumerate() {
        let mut cells: Vec<String> = kept
            .iter()
            .map(|idx| row.get(*idx).cloned().unwrap_or_default())
            .collect();
        if let Some(ages) = &ages {
            cells.push(ages[row_idx].clone());
        }
        view_rows.push(cells);
    }

    BaselineView {
        headers: view_headers,
        rows: view_rows,
    }
}

/// Parse a birth-date cell in the formats the sheets actually use.
fn parse_birth_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
    for format in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return Some(date);
        }
    }
    None
}

/// Completed years between `birth` and `today`.
fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    use chrono::Datelike;
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_counts_completed_years() {
        assert_eq!(age_in_years(date(2010, 6, 15), date(2024, 6, 14)), 13);
        assert_eq!(age_in_years(date(2010, 6, 15), date(2024, 6, 15)), 14);
    }

    #[test]
    fn identifying_columns_are_removed() {
        let table = RawTable {
            headers: vec![
                "ID".to_string(),
                "Nome".to_string(),
                "Data de Nascimento".to_string(),
                "peso".to_string(),
            ],
            rows: vec![vec![
                "P1".to_string(),
                "Fulano".to_string(),
                "2010-06-15".to_string(),
                "41".to_string(),
            ]],
        };
        let view = prepare_baseline(&table, date(2024, 7, 1));
        assert_eq!(view.headers, vec!["id", "peso", "idade"]);
        assert_eq!(view.rows[0], vec!["P1", "41", "14"]);
    }

    #[test]
    fn unparseable_birth_date_leaves_age_blank() {
        let table = RawTable {
            headers: vec!["id".to_string(), "data de nascimento".to_string()],
            rows: vec![vec!["P1".to_string(), "desconhecida".to_string()]],
        };
        let view = prepare_baseline(&table, date(2024, 7, 1));
        assert_eq!(view.rows[0], vec!["P1", ""]);
    }

    #[test]
    fn preview_is_capped() {
        let rows: Vec<Vec<String>> = (0..30).map(|i| vec![format!("P{i}")]).collect();
        let table = RawTable {
            headers: vec!["id".to_string()],
            rows,
        };
        let view = prepare_baseline(&table, date(2024, 7, 1));
        assert_eq!(view.rows.len(), BASELINE_PREVIEW_ROWS);
    }

    #[test]
    fn day_month_year_format() {
        assert_eq!(parse_birth_date("15/06/2010"), Some(date(2010, 6, 15)));
        assert_eq!(parse_birth_date("2010-06-15 00:00:00"), Some(date(2010, 6, 15)));
        assert_eq!(parse_birth_date(""), None);
    }
}
