//! File discovery module for GSOY datasets
//!
//! Finds the per-station CSV files of a GSOY download, grouped by country
//! directory. Discovery is separate from concatenation so the latter can be
//! exercised against any list of paths.

use crate::error::{ProcessorError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A CSV file and the group directory it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCsvFile {
    pub group: String,
    pub path: PathBuf,
}

/// File discovery component for GSOY datasets
///
/// GSOY downloads follow this structure:
/// ```text
/// gsoy_data/
///   Germany/
///     GM000001474.csv
///     GM000003319.csv
///   Kenya/
///     KE000063612.csv
/// ```
#[derive(Debug, Clone)]
pub struct CsvDiscovery {
    root: PathBuf,
}

impl CsvDiscovery {
    /// Create a discovery over `root`, failing if it does not exist
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ProcessorError::missing_input(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily walk `<root>/<group>/*.csv` in name order
    ///
    /// Each call starts a fresh walk. Unreadable entries are logged and
    /// skipped.
    pub fn iter(&self) -> impl Iterator<Item = GroupedCsvFile> + '_ {
        WalkDir::new(&self.root)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_csv_file(entry.path()))
            .filter_map(|entry| {
                let group = entry
                    .path()
                    .parent()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())?;
                debug!("Discovered {} in group {}", entry.path().display(), group);
                Some(GroupedCsvFile {
                    group,
                    path: entry.into_path(),
                })
            })
    }

    /// Group directories directly under the root, in name order
    ///
    /// Directories without any CSV file are included.
    pub fn groups(&self) -> Vec<String> {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    }
}

/// Check if a path is a CSV file
fn is_csv_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "csv")
}
