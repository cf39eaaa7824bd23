//! Camera metric derivation from shot metadata.

use subwriter_model::{
    AttributeSeries, CameraAttribute, HeightMetrics, ShotMetadata, SubmissionFields, ValueRange,
};
use thiserror::Error;

use crate::normalization::{LENS_UNIT, format_decimal, format_range, format_rounded, round2};

/// Shot metadata is missing data a metric needs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("shot metadata has no {0} attribute")]
    MissingAttribute(CameraAttribute),

    #[error("shot metadata has no range for {0}")]
    MissingRange(CameraAttribute),

    #[error("shot metadata has no numeric frames for {0}")]
    NoFrames(CameraAttribute),
}

/// realHeight start/end frame values and range, rounded to two decimals.
///
/// Frame keys are sorted numerically; keys that are not integers and values
/// that are not numbers are ignored.
pub fn height_metrics(metadata: &ShotMetadata) -> Result<HeightMetrics, MetricsError> {
    let attribute = CameraAttribute::RealHeight;
    let series = metadata
        .attribute(attribute)
        .ok_or(MetricsError::MissingAttribute(attribute))?;
    let range = series.range.ok_or(MetricsError::MissingRange(attribute))?;
    let (start, end) =
        first_and_last_frame(&series).ok_or(MetricsError::NoFrames(attribute))?;
    Ok(HeightMetrics {
        start: round2(start),
        end: round2(end),
        min: round2(range.min),
        max: round2(range.max),
    })
}

/// Height metrics for an optional document.
///
/// Returns `None` when the document is absent, and logs a warning and
/// returns `None` when it lacks the realHeight data.
pub fn extract_height_metrics(metadata: Option<&ShotMetadata>) -> Option<HeightMetrics> {
    match height_metrics(metadata?) {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            tracing::warn!(%error, "no height metrics");
            None
        }
    }
}

/// Tracker field values for the batch updater.
pub fn submission_fields(metadata: &ShotMetadata) -> Result<SubmissionFields, MetricsError> {
    let height = declared_range(metadata, CameraAttribute::RealHeight)?;
    let speed = declared_range(metadata, CameraAttribute::Speed)?;
    let tilt = declared_range(metadata, CameraAttribute::RealTilt)?;
    let lens = declared_range(metadata, CameraAttribute::Lens)?;
    let metrics = height_metrics(metadata)?;

    Ok(SubmissionFields {
        height: format_range(height.min, height.max),
        speed: format_range(speed.min, speed.max),
        tilt: format_range(tilt.min, tilt.max),
        lens: format_lens_range(lens),
        height_frame_start: format_rounded(metrics.start),
        height_end_frame: format_rounded(metrics.end),
        height_true_min: format_rounded(metrics.min),
        height_true_max: format_rounded(metrics.max),
    })
}

fn declared_range(
    metadata: &ShotMetadata,
    attribute: CameraAttribute,
) -> Result<ValueRange, MetricsError> {
    metadata
        .attribute(attribute)
        .ok_or(MetricsError::MissingAttribute(attribute))?
        .range
        .ok_or(MetricsError::MissingRange(attribute))
}

/// `"35.0mm"` for a fixed lens, `"35.0mm -> 50.0mm"` for a zoom.
fn format_lens_range(range: ValueRange) -> String {
    if range.min == range.max {
        format!("{}{LENS_UNIT}", format_decimal(range.min))
    } else {
        format!(
            "{}{LENS_UNIT} -> {}{LENS_UNIT}",
            format_decimal(range.min),
            format_decimal(range.max)
        )
    }
}

fn first_and_last_frame(series: &AttributeSeries) -> Option<(f64, f64)> {
    let mut frames: Vec<(i64, f64)> = series
        .numeric_values()
        .filter_map(|(frame, value)| Some((frame.trim().parse::<i64>().ok()?, value)))
        .collect();
    frames.sort_by_key(|(frame, _)| *frame);
    let first = frames.first()?.1;
    let last = frames.last()?.1;
    Some((first, last))
}
