//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "metrotox",
    version,
    about = "Toxicity-by-cycle analysis for metronomic chemotherapy trials",
    long_about = "Ingest per-cycle clinical spreadsheets, normalize them into a \
                  patient/cycle table and generate descriptive toxicity reports.\n\n\
                  Supports CSV and XLSX inputs with heterogeneous human-entered \
                  headers; outputs a static HTML report plus a terminal summary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the pipeline over a spreadsheet and generate the report.
    Run(RunArgs),

    /// List the recognized toxicity and measurement fields.
    Fields,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Input spreadsheet (.csv/.xlsx), or a directory to search.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// File name to locate when INPUT is a directory (searched recursively).
    #[arg(long = "input-name", value_name = "NAME")]
    pub input_name: Option<String>,

    /// Baseline demographics sheet shown (anonymized) in the report.
    #[arg(long = "baseline", value_name = "FILE")]
    pub baseline: Option<PathBuf>,

    /// Output directory for the report (default: <INPUT dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Protocol cutoff: drop records beyond this cycle.
    ///
    /// The metronomic protocol plans 12 cycles; pass 12 to keep the analysis
    /// window comparable across patients with longer follow-up.
    #[arg(long = "max-cycle", value_name = "N")]
    pub max_cycle: Option<u32>,

    /// Use this normalized column as the patient identifier instead of the
    /// id-prefix heuristic.
    #[arg(long = "id-column", value_name = "COLUMN")]
    pub id_column: Option<String>,

    /// Use this normalized column as the cycle index instead of the cycle
    /// token heuristic.
    #[arg(long = "cycle-column", value_name = "COLUMN")]
    pub cycle_column: Option<String>,

    /// Analyze and print the summary without writing the HTML report.
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// Report title.
    #[arg(
        long = "title",
        default_value = "Technical report: metronomic treatment"
    )]
    pub title: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
