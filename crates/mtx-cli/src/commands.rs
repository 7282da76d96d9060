//! Command implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;
use tracing::info;

use mtx_cli::pipeline::{PipelineOutcome, run_pipeline};
use mtx_model::{MEASURE_FIELDS, PipelineOptions, TOXICITY_FIELDS};
use mtx_report::{ReportOptions, write_html_report};

use crate::cli::RunArgs;
use crate::summary::apply_table_style;

/// Result of the `run` command: the pipeline outcome plus the report path,
/// when one was written.
pub struct RunResult {
    pub outcome: PipelineOutcome,
    pub report: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<RunResult> {
    let options = PipelineOptions::new()
        .with_max_cycle(args.max_cycle)
        .with_identifier_column(args.id_column.clone())
        .with_cycle_column(args.cycle_column.clone());

    let outcome = run_pipeline(
        &args.input,
        args.input_name.as_deref(),
        args.baseline.as_deref(),
        &options,
    )?;

    let report = if args.no_report {
        None
    } else {
        let output_dir = args.output_dir.clone().unwrap_or_else(|| {
            if args.input.is_dir() {
                args.input.join("output")
            } else {
                args.input
                    .parent()
                    .map(|parent| parent.join("output"))
                    .unwrap_or_else(|| PathBuf::from("output"))
            }
        });
        let path = output_dir.join("relatorio.html");
        let report_options = ReportOptions {
            title: args.title.clone(),
            subtitle: subtitle_for(&outcome, args.max_cycle),
            generated_at: Local::now().format("%d/%m/%Y %H:%M").to_string(),
        };
        write_html_report(&path, &outcome.views, &outcome.baseline, &report_options)
            .context("write html report")?;
        info!(report = %path.display(), "report written");
        Some(path)
    };

    Ok(RunResult { outcome, report })
}

fn subtitle_for(outcome: &PipelineOutcome, max_cycle: Option<u32>) -> String {
    match max_cycle {
        Some(max_cycle) => format!(
            "Descriptive analysis per treatment cycle, limited to the {max_cycle} \
             protocol cycles ({} records)",
            outcome.records
        ),
        None => format!(
            "Descriptive analysis per treatment cycle ({} records)",
            outcome.records
        ),
    }
}

/// List the recognized clinical fields.
pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Label", "Kind", "Description"]);
    apply_table_style(&mut table);
    for field in TOXICITY_FIELDS {
        table.add_row(vec![field.column, field.label, "toxicity", field.description]);
    }
    for field in MEASURE_FIELDS {
        table.add_row(vec![
            field.column,
            field.label,
            "measurement",
            field.description,
        ]);
    }
    println!("{table}");
    Ok(())
}
