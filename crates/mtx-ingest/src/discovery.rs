//! Input discovery.
//!
//! Study folders arrive with spreadsheets scattered over subdirectories, so
//! discovery walks recursively. Entries are visited in sorted order to keep
//! results deterministic across runs.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

const TABULAR_EXTENSIONS: &[&str] = &["csv", "xlsx"];

/// Does this path look like a supported tabular input?
pub fn is_tabular_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            TABULAR_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// List all tabular files directly under `dir`, sorted by file name.
pub fn list_tabular_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry_result in std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })? {
        let entry = entry_result.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && is_tabular_file(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Find a file by exact name anywhere under `base`, depth-first.
pub fn find_input_file(base: &Path, name: &str) -> Result<PathBuf> {
    if !base.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: base.to_path_buf(),
        });
    }
    walk_for_name(base, name)?.ok_or_else(|| IngestError::FileNotFound {
        name: name.to_string(),
        base: base.to_path_buf(),
    })
}

fn walk_for_name(dir: &Path, name: &str) -> Result<Option<PathBuf>> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    for path in &entries {
        if path.is_file() && path.file_name().and_then(|n| n.to_str()) == Some(name) {
            return Ok(Some(path.clone()));
        }
    }
    for path in &entries {
        if path.is_dir()
            && let Some(found) = walk_for_name(path, name)?
        {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Resolve the single tabular input under a directory.
///
/// With a `name`, searches recursively for that exact file. Without one,
/// exactly one tabular file must sit directly in the directory; zero or
/// several is an error so a wrong sheet is never picked silently.
pub fn resolve_input(base: &Path, name: Option<&str>) -> Result<PathBuf> {
    match name {
        Some(name) => find_input_file(base, name),
        None => {
            let files = list_tabular_files(base)?;
            match files.len() {
                0 => Err(IngestError::NoTabularFile {
                    base: base.to_path_buf(),
                }),
                1 => Ok(files.into_iter().next().expect("one file")),
                count => Err(IngestError::AmbiguousInput {
                    base: base.to_path_buf(),
                    count,
                }),
            }
        }
    }
}
