//! Grade-distribution view.

use std::collections::BTreeMap;

use anyhow::Result;

use mtx_model::GRADE_LEVELS;
use mtx_transform::VisitFrame;

/// Percentage of a cycle's evaluated records at each grade level.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionRow {
    /// The cycle had no evaluated record for this field. An explicit marker:
    /// normalizing an empty cycle would divide by zero.
    NoData,
    /// Percentages by grade 0..=4; sums to 100 within floating-point error.
    Percentages([f64; GRADE_LEVELS]),
}

/// Grade distribution per cycle for one toxicity field.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeDistribution {
    pub field: String,
    /// One row per cycle present in the frame, ascending.
    pub rows: Vec<(i64, DistributionRow)>,
}

impl GradeDistribution {
    pub fn row(&self, cycle: i64) -> Option<&DistributionRow> {
        self.rows
            .iter()
            .find(|(row_cycle, _)| *row_cycle == cycle)
            .map(|(_, row)| row)
    }
}

/// Build the grade distribution: per cycle, count evaluated records at each
/// grade level and normalize the row to percentages. Unevaluated records are
/// excluded from both the counts and the denominator.
pub fn build_grade_distribution(frame: &VisitFrame, field: &str) -> Result<GradeDistribution> {
    let cycles = frame.cycles()?;
    let grades = frame.grades(field)?;

    let mut counts: BTreeMap<i64, [usize; GRADE_LEVELS]> = BTreeMap::new();
    for cycle in &cycles {
        counts.entry(*cycle).or_insert([0; GRADE_LEVELS]);
    }
    for (cycle, grade) in cycles.iter().zip(&grades) {
        if let Some(grade) = grade {
            let entry = counts.entry(*cycle).or_insert([0; GRADE_LEVELS]);
            entry[grade.value() as usize] += 1;
        }
    }

    let rows = counts
        .into_iter()
        .map(|(cycle, row_counts)| {
            let total: usize = row_counts.iter().sum();
            let row = if total == 0 {
                DistributionRow::NoData
            } else {
                let mut percentages = [0.0; GRADE_LEVELS];
                for (slot, count) in percentages.iter_mut().zip(row_counts) {
                    *slot = count as f64 / total as f64 * 100.0;
                }
                DistributionRow::Percentages(percentages)
            };
            (cycle, row)
        })
        .collect();

    Ok(GradeDistribution {
        field: field.to_string(),
        rows,
    })
}
