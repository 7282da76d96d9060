//! Max- and mean-severity views for one toxicity field.

use std::collections::BTreeMap;

use anyhow::Result;

use mtx_model::Grade;
use mtx_transform::VisitFrame;

use crate::matrix::CycleMatrix;

/// Build the max-severity matrix for a toxicity field: the worst grade each
/// patient reached in each cycle.
///
/// Cells without an evaluated grade are zero-filled, the same policy as the
/// presence matrix: a patient-cycle pair with no assessment renders as "no
/// event". The mean series below makes the opposite choice; both behaviors
/// come from the source system and are preserved as-is.
pub fn build_max_severity_matrix(frame: &VisitFrame, field: &str) -> Result<CycleMatrix> {
    let cycles = frame.cycles()?;
    let patients = frame.patient_ids()?;
    let grades = frame.grades(field)?;

    let mut matrix = CycleMatrix::zero_filled(cycles.clone(), patients.clone());
    for ((cycle, patient), grade) in cycles.iter().zip(&patients).zip(&grades) {
        if let Some(grade) = grade {
            matrix.raise(*cycle, patient, grade.value());
        }
    }
    Ok(matrix)
}

/// One cycle of the mean-severity series.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanSeverityPoint {
    pub cycle: i64,
    /// Mean grade over evaluated records, `None` when the cycle has no
    /// evaluated record at all.
    pub mean: Option<f64>,
    /// Number of evaluated records backing the mean.
    pub evaluated: usize,
}

/// Mean toxicity grade per cycle for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanSeveritySeries {
    pub field: String,
    pub points: Vec<MeanSeverityPoint>,
}

/// Build the mean-severity series. Unevaluated cells are excluded from both
/// numerator and denominator; they are missing assessments, not zeros.
pub fn build_mean_severity_series(frame: &VisitFrame, field: &str) -> Result<MeanSeveritySeries> {
    let cycles = frame.cycles()?;
    let grades = frame.grades(field)?;

    let mut sums: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for cycle in &cycles {
        sums.entry(*cycle).or_insert((0.0, 0));
    }
    for (cycle, grade) in cycles.iter().zip(&grades) {
        if let Some(grade) = grade {
            let entry = sums.entry(*cycle).or_insert((0.0, 0));
            entry.0 += f64::from(grade.value());
            entry.1 += 1;
        }
    }

    let points = sums
        .into_iter()
        .map(|(cycle, (sum, evaluated))| MeanSeverityPoint {
            cycle,
            mean: (evaluated > 0).then(|| sum / evaluated as f64),
            evaluated,
        })
        .collect();

    Ok(MeanSeveritySeries {
        field: field.to_string(),
        points,
    })
}

/// Worst grade observed anywhere in a field, for summary output.
pub fn overall_max_grade(frame: &VisitFrame, field: &str) -> Result<Option<Grade>> {
    Ok(frame.grades(field)?.into_iter().flatten().max())
}
