use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("read directory {}: {}", .path.display(), .source)]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file '{}' not found under {}", .name, .base.display())]
    FileNotFound { name: String, base: PathBuf },

    #[error("no tabular file (.csv/.xlsx) found under {}", .base.display())]
    NoTabularFile { base: PathBuf },

    #[error("ambiguous input: {} tabular files under {} (pass an explicit file)", .count, .base.display())]
    AmbiguousInput { base: PathBuf, count: usize },

    #[error("unsupported input extension: {}", .path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("read csv {}: {}", .path.display(), .source)]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("read workbook {}: {}", .path.display(), .source)]
    Xlsx {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("workbook has no worksheets: {}", .path.display())]
    EmptyWorkbook { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
