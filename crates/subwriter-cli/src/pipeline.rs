//! Export and batch-update pipelines.
//!
//! Both flows isolate per-version problems: a missing record, sidecar, or
//! metric is logged and the loop moves on. Only tracker connectivity
//! failures end a run early.

use std::path::{Path, PathBuf};

use subwriter_ingest::{MetadataError, load_shot_metadata, resolve_shot_metadata};
use subwriter_model::{
    CODE_FIELD, Playlist, SIDECAR_PATH_FIELD, Sheet, Shot, UPDATED_MARKER_FIELD, VersionRecord,
};
use subwriter_output::OutputFormat;
use subwriter_tracker::{Tracker, TrackerError};
use subwriter_transform::{MetricsError, build_row, extract_height_metrics, submission_fields};
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use crate::context::ProjectContext;
use crate::types::{ExportSheet, UpdateFailure, UpdateReport};

/// Task name the batch updater filters shots by when none is given.
pub const DEFAULT_TASK: &str = "Previs";

/// Characters replaced when a playlist code becomes a file name.
const UNSAFE_FILE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Finds a playlist by code: an exact match wins, otherwise the first
/// playlist whose code contains `name`.
pub fn select_playlist<'a>(playlists: &'a [Playlist], name: &str) -> Option<&'a Playlist> {
    playlists
        .iter()
        .find(|playlist| playlist.code == name)
        .or_else(|| playlists.iter().find(|playlist| playlist.code.contains(name)))
}

/// Builds the submission sheet for the context's playlist.
///
/// Rows follow the playlist's version order. Versions the tracker no longer
/// has are skipped with a warning. Returns `None`, with a warning, when the
/// playlist has no versions at all.
pub fn build_submission_sheet<T: Tracker>(
    ctx: &ProjectContext<'_, T>,
) -> Result<Option<ExportSheet>, TrackerError> {
    let span = info_span!("export", playlist = %ctx.playlist.code);
    let _guard = span.enter();

    if ctx.playlist.versions.is_empty() {
        warn!("no versions found for playlist, nothing to export");
        return Ok(None);
    }

    let fields = ctx.config.query_fields();
    let mut export = ExportSheet {
        sheet: Sheet::new(ctx.config.headers()),
        ..ExportSheet::default()
    };

    for link in &ctx.playlist.versions {
        let version = match ctx.tracker.find_version(link.id, &fields) {
            Ok(Some(version)) => version,
            Ok(None) => {
                warn!(version_id = link.id, "version record not found, skipping");
                export.missing_versions.push(link.id);
                continue;
            }
            Err(error) if error.is_connectivity() => return Err(error),
            Err(error) => {
                warn!(version_id = link.id, %error, "failed to read version, skipping");
                export.missing_versions.push(link.id);
                continue;
            }
        };

        let metrics = if version.is_edit() {
            debug!(version = %version.code(), "edit version, derived columns not applicable");
            None
        } else {
            extract_height_metrics(resolve_shot_metadata(&version).as_ref())
        };
        if metrics.is_none() {
            export.without_metrics += 1;
        }

        export
            .sheet
            .push_row(build_row(&ctx.config, &version, metrics.as_ref(), &ctx.rules));
    }

    info!(
        rows = export.sheet.row_count(),
        missing = export.missing_versions.len(),
        "Built submission sheet"
    );
    Ok(Some(export))
}

/// Where an export is written.
///
/// An explicit `output` path wins. Otherwise the file is named after the
/// playlist inside `submission_dir`, or the current directory.
pub fn resolve_output_path(
    output: Option<&Path>,
    submission_dir: Option<&Path>,
    playlist_code: &str,
    format: OutputFormat,
) -> PathBuf {
    if let Some(path) = output {
        return path.to_path_buf();
    }
    let dir = submission_dir.unwrap_or_else(|| Path::new("."));
    dir.join(format!(
        "{}.{}",
        safe_file_stem(playlist_code),
        format.extension()
    ))
}

/// Output format: an explicit choice, else the output path's extension,
/// else XLSX.
pub fn resolve_output_format(explicit: Option<OutputFormat>, output: Option<&Path>) -> OutputFormat {
    explicit
        .or_else(|| output.and_then(OutputFormat::from_path))
        .unwrap_or_default()
}

fn safe_file_stem(code: &str) -> String {
    let stem: String = code
        .trim()
        .chars()
        .map(|c| if UNSAFE_FILE_CHARS.contains(&c) { '_' } else { c })
        .collect();
    if stem.is_empty() {
        "submission".to_string()
    } else {
        stem
    }
}

/// Options for the batch updater.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Substring matched against each shot's task names.
    pub task: String,
    /// Compute and log the fields without writing them.
    pub dry_run: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            task: DEFAULT_TASK.to_string(),
            dry_run: false,
        }
    }
}

/// Fields the batch updater reads for each version.
fn update_query_fields() -> Vec<String> {
    [CODE_FIELD, SIDECAR_PATH_FIELD, UPDATED_MARKER_FIELD]
        .map(String::from)
        .to_vec()
}

/// Writes camera-derived fields to every not-yet-updated version of every
/// shot under the task filter.
pub fn update_submission_versions<T: Tracker>(
    tracker: &T,
    options: &UpdateOptions,
) -> Result<UpdateReport, TrackerError> {
    let span = info_span!("update", task = %options.task, dry_run = options.dry_run);
    let _guard = span.enter();

    let mut report = UpdateReport {
        task: options.task.clone(),
        dry_run: options.dry_run,
        ..UpdateReport::default()
    };

    let shots: Vec<Shot> = tracker
        .find_shots()?
        .into_iter()
        .filter(|shot| shot.has_task(&options.task))
        .collect();
    if shots.is_empty() {
        warn!(
            project = %tracker.project().label(),
            "no shots have a task matching the filter"
        );
    }

    let fields = update_query_fields();
    for shot in &shots {
        report.shots_scanned += 1;
        let versions = match tracker.find_shot_versions(shot, &fields) {
            Ok(versions) => versions,
            Err(error) if error.is_connectivity() => return Err(error),
            Err(error) => {
                warn!(shot = %shot.code, %error, "failed to list versions, skipping shot");
                report.failures.push(UpdateFailure {
                    version: format!("shot {}", shot.code),
                    reason: error.to_string(),
                });
                continue;
            }
        };
        if versions.is_empty() {
            warn!(shot = %shot.code, "no versions found for shot, skipping");
            continue;
        }

        for version in &versions {
            if version.is_marked_updated() {
                debug!(version = %version.code(), "already updated, skipping");
                report.skipped += 1;
                continue;
            }
            match update_version(tracker, version, options.dry_run) {
                Ok(()) => report.updated.push(version_name(version)),
                Err(VersionFailure::Tracker(error)) if error.is_connectivity() => {
                    return Err(error);
                }
                Err(failure) => {
                    let reason = failure.to_string();
                    warn!(version = %version_name(version), %reason, "version not updated");
                    report.failures.push(UpdateFailure {
                        version: version_name(version),
                        reason,
                    });
                }
            }
        }
    }

    info!(
        shots = report.shots_scanned,
        updated = report.updated.len(),
        skipped = report.skipped,
        failed = report.failures.len(),
        "Batch update finished"
    );
    Ok(report)
}

/// Why one version could not be updated.
#[derive(Debug, Error)]
enum VersionFailure {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

fn update_version<T: Tracker>(
    tracker: &T,
    version: &VersionRecord,
    dry_run: bool,
) -> Result<(), VersionFailure> {
    let metadata = load_shot_metadata(version)?;
    let payload = submission_fields(&metadata)?.to_payload();

    if dry_run {
        info!(version = %version_name(version), fields = ?payload, "dry run, not writing");
        return Ok(());
    }
    tracker.update_version(version.id, &payload)?;
    debug!(version = %version_name(version), "updated");
    Ok(())
}

fn version_name(version: &VersionRecord) -> String {
    match version.code() {
        "" => format!("#{}", version.id),
        code => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subwriter_model::EntityLink;

    fn playlist(id: u64, code: &str) -> Playlist {
        Playlist {
            id,
            code: code.to_string(),
            versions: vec![EntityLink::new("Version", id * 10)],
        }
    }

    #[test]
    fn test_select_playlist_prefers_exact() {
        let playlists = vec![
            playlist(1, "DELIVERY_0412_retakes"),
            playlist(2, "DELIVERY_0412"),
        ];
        assert_eq!(select_playlist(&playlists, "DELIVERY_0412").map(|p| p.id), Some(2));
        assert_eq!(select_playlist(&playlists, "0412").map(|p| p.id), Some(1));
        assert!(select_playlist(&playlists, "0501").is_none());
    }

    #[test]
    fn test_resolve_output_path() {
        let path = resolve_output_path(
            None,
            Some(Path::new("/mnt/submissions")),
            "DELIVERY 04/12",
            OutputFormat::Xlsx,
        );
        assert_eq!(path, PathBuf::from("/mnt/submissions/DELIVERY 04_12.xlsx"));

        let path = resolve_output_path(
            Some(Path::new("out/custom.csv")),
            Some(Path::new("/mnt/submissions")),
            "DELIVERY",
            OutputFormat::Csv,
        );
        assert_eq!(path, PathBuf::from("out/custom.csv"));

        let path = resolve_output_path(None, None, "  ", OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("./submission.csv"));
    }

    #[test]
    fn test_resolve_output_format() {
        assert_eq!(resolve_output_format(None, None), OutputFormat::Xlsx);
        assert_eq!(
            resolve_output_format(None, Some(Path::new("a.CSV"))),
            OutputFormat::Csv
        );
        assert_eq!(
            resolve_output_format(Some(OutputFormat::Xlsx), Some(Path::new("a.csv"))),
            OutputFormat::Xlsx
        );
    }
}
