//! Aggregation views over enriched visit frames.
//!
//! Four view shapes per toxicity field (presence, max severity, mean
//! severity, grade distribution) plus per-patient and per-cycle clinical
//! summaries. All views are derived, read-only, and rebuilt per run.

pub mod distribution;
pub mod matrix;
pub mod presence;
pub mod severity;
pub mod summary;
pub mod views;

pub use distribution::{DistributionRow, GradeDistribution, build_grade_distribution};
pub use matrix::CycleMatrix;
pub use presence::build_presence_matrix;
pub use severity::{
    MeanSeverityPoint, MeanSeveritySeries, build_max_severity_matrix, build_mean_severity_series,
    overall_max_grade,
};
pub use summary::{CycleSummary, PatientSummary, summarize_by_cycle, summarize_by_patient};
pub use views::{StudyViews, ToxicityViews, build_study_views};
