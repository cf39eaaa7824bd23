use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use subwriter_cli::context::ProjectContext;
use subwriter_cli::pipeline::{
    UpdateOptions, build_submission_sheet, resolve_output_format, resolve_output_path,
    select_playlist, update_submission_versions,
};
use subwriter_cli::types::{ExportResult, UpdateReport};
use subwriter_ingest::load_field_mapping;
use subwriter_output::write_sheet;
use subwriter_tracker::{ShotgunClient, Tracker};

use crate::cli::{ExportArgs, TrackerArgs, UpdateArgs};
use crate::summary::print_playlists;

fn connect(args: &TrackerArgs) -> Result<ShotgunClient> {
    ShotgunClient::connect(&args.settings()).context("connect to tracker")
}

pub fn run_playlists(tracker_args: &TrackerArgs) -> Result<()> {
    let tracker = connect(tracker_args)?;
    let mut playlists = tracker.find_playlists().context("list playlists")?;
    playlists.sort_by(|a, b| a.code.cmp(&b.code));
    print_playlists(&tracker.project().label(), &playlists);
    Ok(())
}

pub fn run_export(tracker_args: &TrackerArgs, args: &ExportArgs) -> Result<ExportResult> {
    let span = info_span!("export_command", playlist = %args.playlist);
    let _guard = span.enter();

    let config = load_field_mapping(&args.config).context("load field mapping")?;
    let tracker = connect(tracker_args)?;
    let playlists = tracker.find_playlists().context("list playlists")?;
    let playlist = select_playlist(&playlists, &args.playlist)
        .cloned()
        .ok_or_else(|| {
            anyhow!(
                "no playlist matching {:?} in {}",
                args.playlist,
                tracker.project().label()
            )
        })?;
    info!(playlist = %playlist.code, versions = playlist.versions.len(), "Selected playlist");

    let ctx = ProjectContext::new(&tracker, config, playlist);
    let Some(export) = build_submission_sheet(&ctx).context("read playlist versions")? else {
        return Ok(ExportResult {
            playlist: ctx.playlist.code.clone(),
            output: None,
            rows: 0,
            missing_versions: Vec::new(),
            without_metrics: 0,
        });
    };

    let format = resolve_output_format(args.format.map(Into::into), args.output.as_deref());
    let output = resolve_output_path(
        args.output.as_deref(),
        args.submission_dir.as_deref(),
        &ctx.playlist.code,
        format,
    );
    write_sheet(&export.sheet, &output, format)
        .with_context(|| format!("write {}", output.display()))?;

    Ok(ExportResult {
        playlist: ctx.playlist.code.clone(),
        output: Some(output),
        rows: export.sheet.row_count(),
        missing_versions: export.missing_versions,
        without_metrics: export.without_metrics,
    })
}

pub fn run_update(tracker_args: &TrackerArgs, args: &UpdateArgs) -> Result<UpdateReport> {
    let tracker = connect(tracker_args)?;
    let options = UpdateOptions {
        task: args.task.clone(),
        dry_run: args.dry_run,
    };
    update_submission_versions(&tracker, &options).context("batch update")
}
