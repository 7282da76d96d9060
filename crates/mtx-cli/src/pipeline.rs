//! Pipeline orchestration: ingest → normalize → resolve → enrich →
//! truncate → aggregate.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use tracing::{info, info_span, warn};

use mtx_aggregate::{StudyViews, build_study_views};
use mtx_ingest::{TableLoader, resolve_input};
use mtx_model::PipelineOptions;
use mtx_transform::{
    BaselineView, CycleSource, build_visit_frame, normalize_columns, prepare_baseline,
    resolve_identifier, truncate_cycles,
};

/// Everything a single pipeline run produces.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The resolved input file.
    pub input: PathBuf,
    /// Records in the aggregated window.
    pub records: usize,
    /// Records dropped by the cycle cutoff.
    pub truncated: usize,
    pub cycle_source: CycleSource,
    pub views: StudyViews,
    pub baseline: BaselineView,
}

/// Run the whole pipeline for one input.
///
/// `input` may be a spreadsheet or a directory; directories are resolved via
/// `input_name` (recursive search) or by containing exactly one tabular file.
/// Structural failures (missing input, unresolvable identifier) abort the
/// run; cell-level problems degrade to sentinels inside the frame.
pub fn run_pipeline(
    input: &Path,
    input_name: Option<&str>,
    baseline_path: Option<&Path>,
    options: &PipelineOptions,
) -> Result<PipelineOutcome> {
    let span = info_span!("pipeline", input = %input.display());
    let _guard = span.enter();

    let input_file = if input.is_dir() {
        resolve_input(input, input_name)?
    } else {
        input.to_path_buf()
    };

    let mut loader = TableLoader::new();
    let mut table = loader.load(&input_file)?.clone();
    info!(
        input = %input_file.display(),
        columns = table.headers.len(),
        rows = table.height(),
        "input loaded"
    );

    normalize_columns(&mut table);
    resolve_identifier(&mut table, options)?;

    let mut frame = build_visit_frame(&table, options)?;
    let truncated = match options.max_cycle {
        Some(max_cycle) => truncate_cycles(&mut frame, max_cycle)?,
        None => 0,
    };
    info!(
        records = frame.record_count(),
        truncated,
        toxicity_fields = frame.toxicity_fields.len(),
        "visit frame ready"
    );

    let views = build_study_views(&frame)?;
    let baseline = load_baseline(&mut loader, baseline_path);

    Ok(PipelineOutcome {
        input: input_file,
        records: frame.record_count(),
        truncated,
        cycle_source: frame.cycle_source.clone(),
        views,
        baseline,
    })
}

/// Baseline is report context only: a missing or unreadable sheet downgrades
/// to an empty excerpt instead of failing the toxicity analysis.
fn load_baseline(loader: &mut TableLoader, path: Option<&Path>) -> BaselineView {
    let Some(path) = path else {
        return BaselineView::default();
    };
    match loader.load(path) {
        Ok(table) => prepare_baseline(table, Local::now().date_naive()),
        Err(error) => {
            warn!(path = %path.display(), %error, "baseline sheet skipped");
            BaselineView::default()
        }
    }
}
