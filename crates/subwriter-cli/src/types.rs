//! Command results.

use std::path::PathBuf;

use subwriter_model::Sheet;

/// Rows built for one playlist.
#[derive(Debug, Clone, Default)]
pub struct ExportSheet {
    pub sheet: Sheet,
    /// Version ids listed in the playlist whose record could not be read.
    pub missing_versions: Vec<u64>,
    /// Exported versions that have no usable height metrics.
    pub without_metrics: usize,
}

/// Outcome of `subwriter export`.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub playlist: String,
    /// File written; `None` when the playlist had no versions.
    pub output: Option<PathBuf>,
    pub rows: usize,
    pub missing_versions: Vec<u64>,
    pub without_metrics: usize,
}

/// A version the batch updater could not process, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFailure {
    pub version: String,
    pub reason: String,
}

/// Outcome of `subwriter update`.
#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    pub task: String,
    pub dry_run: bool,
    /// Shots whose tasks matched the filter.
    pub shots_scanned: usize,
    /// Versions written (or, on a dry run, that would have been).
    pub updated: Vec<String>,
    /// Versions already marked as updated.
    pub skipped: usize,
    pub failures: Vec<UpdateFailure>,
}

impl UpdateReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
