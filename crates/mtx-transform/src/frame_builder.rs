//! Visit frame construction.
//!
//! Turns a normalized, identifier-resolved [`RawTable`] into the typed
//! [`VisitFrame`]: rows without a usable key are dropped, toxicity cells are
//! reduced to grades, measurements are coerced, and the cycle index is either
//! trusted from the source or derived per patient.

use anyhow::{Context, Result};
use polars::prelude::{
    BooleanChunked, Column, DataFrame, DataType, IntoLazy, NamedFrom, NewChunkedArray, Series,
    col, lit,
};
use tracing::{debug, warn};

use mtx_ingest::RawTable;
use mtx_model::{
    CYCLE_COLUMN, FieldDef, IDENTIFIER_COLUMN, MEASURE_FIELDS, PipelineOptions, TOXICITY_FIELDS,
};

use crate::frame::{CycleSource, VisitFrame};
use crate::grade::extract_grade;
use crate::numeric::{coerce_numeric, parse_i64};
use crate::resolve::find_cycle_column;

/// Build the enriched visit frame from a prepared raw table.
///
/// The table must already have normalized headers and a resolved
/// [`IDENTIFIER_COLUMN`]. Rows with an empty identifier are dropped, as are
/// rows whose explicit cycle value fails integer parsing; both are counted
/// and logged rather than failing the run.
pub fn build_visit_frame(table: &RawTable, options: &PipelineOptions) -> Result<VisitFrame> {
    let ids = table
        .column_values(IDENTIFIER_COLUMN)
        .context("identifier column not resolved before frame construction")?;

    let cycle_column = find_cycle_column(&table.headers, options);
    let explicit_cycles: Option<Vec<Option<i64>>> = cycle_column
        .as_deref()
        .and_then(|name| table.column_values(name))
        .map(|values| values.into_iter().map(parse_i64).collect());

    // Row keep-list: a usable key, and a parseable cycle when one is trusted.
    let mut keep: Vec<bool> = Vec::with_capacity(table.height());
    let mut missing_id = 0usize;
    let mut bad_cycle = 0usize;
    for (idx, id) in ids.iter().enumerate() {
        if id.is_empty() {
            missing_id += 1;
            keep.push(false);
            continue;
        }
        if let Some(cycles) = &explicit_cycles
            && cycles[idx].is_none()
        {
            bad_cycle += 1;
            keep.push(false);
            continue;
        }
        keep.push(true);
    }
    if missing_id > 0 {
        warn!(rows = missing_id, "dropped rows with empty patient identifier");
    }
    if bad_cycle > 0 {
        warn!(rows = bad_cycle, "dropped rows with unparseable cycle value");
    }

    let kept_ids: Vec<String> = ids
        .iter()
        .zip(&keep)
        .filter(|(_, keep)| **keep)
        .map(|(id, _)| (*id).to_string())
        .collect();

    let mut columns: Vec<Column> = Vec::new();
    columns.push(Series::new(IDENTIFIER_COLUMN.into(), kept_ids).into());

    if let Some(cycles) = &explicit_cycles {
        let kept_cycles: Vec<i64> = cycles
            .iter()
            .zip(&keep)
            .filter(|(_, keep)| **keep)
            .map(|(cycle, _)| cycle.expect("unparseable cycles were dropped"))
            .collect();
        columns.push(Series::new(CYCLE_COLUMN.into(), kept_cycles).into());
    }

    let toxicity_fields = fields_present(table, TOXICITY_FIELDS);
    for field in &toxicity_fields {
        let values = kept_column(table, &keep, field.column)
            .context("toxicity column disappeared mid-build")?;
        let grades: Vec<Option<i32>> = values
            .iter()
            .map(|cell| extract_grade(cell).map(|grade| i32::from(grade.value())))
            .collect();
        columns.push(Series::new(field.column.into(), grades).into());
    }

    let measure_fields = fields_present(table, MEASURE_FIELDS);
    for field in &measure_fields {
        let values = kept_column(table, &keep, field.column)
            .context("measurement column disappeared mid-build")?;
        let coerced: Vec<Option<f64>> = values.iter().map(|cell| coerce_numeric(cell)).collect();
        columns.push(Series::new(field.column.into(), coerced).into());
    }

    let mut data = DataFrame::new(columns).context("build visit frame")?;

    let cycle_source = match cycle_column {
        Some(column) => {
            debug!(column = %column, "using explicit cycle column");
            CycleSource::Explicit { column }
        }
        None => {
            data = assign_cycle_numbers(data)?;
            debug!("derived per-patient cycle sequence");
            CycleSource::Derived
        }
    };

    Ok(VisitFrame {
        data,
        toxicity_fields,
        measure_fields,
        cycle_source,
    })
}

/// Assign a dense 1-based cycle per patient in encounter order.
///
/// The window expression numbers rows within each identifier group without
/// reordering the frame, which is exactly the stable-sort-then-enumerate
/// semantics: every patient gets 1..N in original row order.
fn assign_cycle_numbers(data: DataFrame) -> Result<DataFrame> {
    use polars::lazy::dsl::int_range;

    let cycle_expr = int_range(lit(0), col(IDENTIFIER_COLUMN).len(), 1, DataType::Int64)
        .over([col(IDENTIFIER_COLUMN)])
        + lit(1);

    let data = data
        .lazy()
        .with_column(cycle_expr.cast(DataType::Int64).alias(CYCLE_COLUMN))
        .collect()
        .context("derive cycle numbers")?;
    Ok(data)
}

/// Drop every record above the protocol cutoff. Returns the number of rows
/// removed. Must run after cycle resolution and before aggregation so the
/// aggregate denominators only see the in-window population.
pub fn truncate_cycles(frame: &mut VisitFrame, max_cycle: u32) -> Result<usize> {
    let cycles = frame.cycles()?;
    let keep: Vec<bool> = cycles
        .iter()
        .map(|cycle| *cycle <= i64::from(max_cycle))
        .collect();
    let dropped = keep.iter().filter(|keep| !**keep).count();
    if dropped > 0 {
        let mask = BooleanChunked::from_slice("truncate".into(), &keep);
        frame.data = frame.data.filter(&mask).context("truncate cycles")?;
        debug!(rows = dropped, max_cycle, "truncated records beyond cutoff");
    }
    Ok(dropped)
}

fn fields_present(table: &RawTable, catalog: &[FieldDef]) -> Vec<FieldDef> {
    catalog
        .iter()
        .filter(|field| table.column_index(field.column).is_some())
        .copied()
        .collect()
}

fn kept_column<'a>(table: &'a RawTable, keep: &[bool], name: &str) -> Option<Vec<&'a str>> {
    let values = table.column_values(name)?;
    Some(
        values
            .into_iter()
            .zip(keep)
            .filter(|(_, keep)| **keep)
            .map(|(value, _)| value)
            .collect(),
    )
}

