use std::path::PathBuf;

use thiserror::Error;

/// Structural pipeline errors. Per-cell parse failures are not errors; they
/// degrade to sentinels and stay out of the aggregates.
#[derive(Debug, Error)]
pub enum MtxError {
    #[error("input table not found: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("no identifier-like column found (normalized headers: {})", .headers.join(", "))]
    UnresolvableIdentifier { headers: Vec<String> },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MtxError>;
