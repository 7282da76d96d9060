//! Memoized table loading, scoped to one pipeline invocation.
//!
//! The loader replaces ambient load-once-per-process caching with an explicit
//! value: callers construct a `TableLoader`, pass it through the run, and drop
//! it when the run ends. Loading the same path twice within a run reads the
//! file once.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use mtx_model::MtxError;

use crate::error::IngestError;
use crate::table::{RawTable, read_csv_table};
use crate::xlsx::read_xlsx_table;

/// Read a tabular file, dispatching on extension.
pub fn read_table(path: &Path) -> std::result::Result<RawTable, IngestError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if extension.eq_ignore_ascii_case("csv") {
        read_csv_table(path)
    } else if extension.eq_ignore_ascii_case("xlsx") {
        read_xlsx_table(path)
    } else {
        Err(IngestError::UnsupportedExtension {
            path: path.to_path_buf(),
        })
    }
}

#[derive(Debug, Default)]
pub struct TableLoader {
    cache: BTreeMap<PathBuf, RawTable>,
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table, memoized per path for the lifetime of this loader.
    ///
    /// A missing file is the fatal `MissingInput` case: the pipeline cannot
    /// start without its source table.
    pub fn load(&mut self, path: &Path) -> Result<&RawTable> {
        if !self.cache.contains_key(path) {
            if !path.is_file() {
                return Err(MtxError::MissingInput {
                    path: path.to_path_buf(),
                }
                .into());
            }
            let table = read_table(path)
                .with_context(|| format!("read table: {}", path.display()))?;
            self.cache.insert(path.to_path_buf(), table);
        } else {
            debug!(path = %path.display(), "table cache hit");
        }
        Ok(&self.cache[path])
    }
}
