//! Normalization and enrichment for per-cycle toxicity tables.
//!
//! The chain runs strictly forward: raw table → normalized headers →
//! resolved identifier/cycle → typed visit frame → (optional) cycle
//! truncation. Aggregation consumes the result in `mtx-aggregate`.

pub mod baseline;
pub mod frame;
pub mod frame_builder;
pub mod grade;
pub mod normalize;
pub mod numeric;
pub mod resolve;

pub use baseline::{BASELINE_PREVIEW_ROWS, BaselineView, prepare_baseline};
pub use frame::{CycleSource, VisitFrame};
pub use frame_builder::{build_visit_frame, truncate_cycles};
pub use grade::extract_grade;
pub use normalize::{normalize_columns, normalize_header};
pub use numeric::{coerce_numeric, parse_i64};
pub use resolve::{find_cycle_column, resolve_identifier};
