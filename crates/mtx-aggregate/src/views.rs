//! The full set of views handed to rendering.

use anyhow::Result;
use tracing::debug;

use mtx_model::FieldDef;
use mtx_transform::VisitFrame;

use crate::distribution::{GradeDistribution, build_grade_distribution};
use crate::matrix::CycleMatrix;
use crate::presence::build_presence_matrix;
use crate::severity::{MeanSeveritySeries, build_max_severity_matrix, build_mean_severity_series};
use crate::summary::{CycleSummary, PatientSummary, summarize_by_cycle, summarize_by_patient};

/// The three per-field views for one toxicity field.
#[derive(Debug, Clone)]
pub struct ToxicityViews {
    pub field: FieldDef,
    pub max_severity: CycleMatrix,
    pub mean_severity: MeanSeveritySeries,
    pub distribution: GradeDistribution,
}

/// Everything the rendering collaborator receives, by value. Rendering must
/// not mutate these; all types hand out shared references only.
#[derive(Debug, Clone)]
pub struct StudyViews {
    pub presence: CycleMatrix,
    pub toxicity: Vec<ToxicityViews>,
    /// Measurement fields backing the summary mean columns, in order.
    pub measure_fields: Vec<FieldDef>,
    pub patient_summary: Vec<PatientSummary>,
    pub cycle_summary: Vec<CycleSummary>,
    /// Highest cycle in the aggregated window (after truncation).
    pub max_cycle_considered: Option<i64>,
    /// Number of distinct patients in the window.
    pub patient_count: usize,
}

/// Build every aggregation view from the enriched frame.
///
/// Views are independent of one another; each is rebuilt from scratch on
/// every run.
pub fn build_study_views(frame: &VisitFrame) -> Result<StudyViews> {
    let presence = build_presence_matrix(frame)?;

    let mut toxicity = Vec::with_capacity(frame.toxicity_fields.len());
    for field in &frame.toxicity_fields {
        toxicity.push(ToxicityViews {
            field: *field,
            max_severity: build_max_severity_matrix(frame, field.column)?,
            mean_severity: build_mean_severity_series(frame, field.column)?,
            distribution: build_grade_distribution(frame, field.column)?,
        });
    }
    debug!(fields = toxicity.len(), "built toxicity views");

    Ok(StudyViews {
        presence,
        toxicity,
        measure_fields: frame.measure_fields.clone(),
        patient_summary: summarize_by_patient(frame)?,
        cycle_summary: summarize_by_cycle(frame)?,
        max_cycle_considered: frame.max_cycle()?,
        patient_count: frame.patient_count()?,
    })
}
