//! The enriched per-visit frame.
//!
//! A [`VisitFrame`] wraps a Polars DataFrame holding one row per patient per
//! observed cycle, with the identifier and cycle columns resolved, toxicity
//! columns reduced to ordinal grades and measurement columns coerced to
//! floats. Once built it is treated as immutable and shared by value with
//! the aggregation and report layers.

use anyhow::{Context, Result};
use polars::prelude::DataFrame;

use mtx_model::{CYCLE_COLUMN, FieldDef, Grade, IDENTIFIER_COLUMN};

/// Where the cycle index came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleSource {
    /// The source sheet carried a cycle column; its values are trusted.
    Explicit { column: String },
    /// No cycle column: a dense 1-based sequence was assigned per patient
    /// in encounter order.
    Derived,
}

#[derive(Debug, Clone)]
pub struct VisitFrame {
    /// Typed table: `id_paciente` (str), `ciclo` (i64, non-null), one
    /// nullable Int32 column per toxicity field, one nullable Float64
    /// column per measurement field.
    pub data: DataFrame,
    /// Toxicity fields present in the source, in catalog order.
    pub toxicity_fields: Vec<FieldDef>,
    /// Measurement fields present in the source, in catalog order.
    pub measure_fields: Vec<FieldDef>,
    pub cycle_source: CycleSource,
}

impl VisitFrame {
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// Patient identifier of every record, in row order.
    pub fn patient_ids(&self) -> Result<Vec<String>> {
        let column = self
            .data
            .column(IDENTIFIER_COLUMN)
            .context("identifier column missing from visit frame")?;
        Ok(column
            .str()
            .context("identifier column is not a string column")?
            .into_iter()
            .map(|value| value.unwrap_or("").to_string())
            .collect())
    }

    /// Cycle index of every record, in row order.
    pub fn cycles(&self) -> Result<Vec<i64>> {
        let column = self
            .data
            .column(CYCLE_COLUMN)
            .context("cycle column missing from visit frame")?;
        Ok(column
            .i64()
            .context("cycle column is not an integer column")?
            .into_iter()
            .map(|value| value.unwrap_or(0))
            .collect())
    }

    /// Extracted grades for one toxicity field, in row order. `None` is an
    /// unevaluated cell.
    pub fn grades(&self, field: &str) -> Result<Vec<Option<Grade>>> {
        let column = self
            .data
            .column(field)
            .with_context(|| format!("toxicity column missing: {field}"))?;
        Ok(column
            .i32()
            .with_context(|| format!("toxicity column is not an i32 column: {field}"))?
            .into_iter()
            .map(|value| value.and_then(|v| Grade::new(v as u8)))
            .collect())
    }

    /// Coerced values for one measurement field, in row order. `None` is a
    /// missing value.
    pub fn measures(&self, field: &str) -> Result<Vec<Option<f64>>> {
        let column = self
            .data
            .column(field)
            .with_context(|| format!("measurement column missing: {field}"))?;
        Ok(column
            .f64()
            .with_context(|| format!("measurement column is not an f64 column: {field}"))?
            .into_iter()
            .collect())
    }

    /// Highest cycle present, if any records remain.
    pub fn max_cycle(&self) -> Result<Option<i64>> {
        Ok(self.cycles()?.into_iter().max())
    }

    /// Number of distinct patients.
    pub fn patient_count(&self) -> Result<usize> {
        let mut ids = self.patient_ids()?;
        ids.sort();
        ids.dedup();
        Ok(ids.len())
    }
}
