//! Derived shot metrics.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::ModelError;
use crate::record::{UPDATED_MARKER_FIELD, UPDATED_MARKER_VALUE};

/// realHeight values at the first and last frame plus its declared range,
/// all rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightMetrics {
    pub start: f64,
    pub end: f64,
    pub min: f64,
    pub max: f64,
}

impl HeightMetrics {
    /// `[start, end, min, max]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.start, self.end, self.min, self.max]
    }

    pub fn value(&self, field: DerivedField) -> f64 {
        match field {
            DerivedField::HeightFrameStart => self.start,
            DerivedField::HeightEndFrame => self.end,
            DerivedField::HeightTrueMin => self.min,
            DerivedField::HeightTrueMax => self.max,
        }
    }
}

/// Derived metrics a spreadsheet column or tracker field can hold.
///
/// The names double as the tracker fields the batch updater writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedField {
    HeightFrameStart,
    HeightEndFrame,
    HeightTrueMin,
    HeightTrueMax,
}

impl DerivedField {
    pub const ALL: [Self; 4] = [
        Self::HeightFrameStart,
        Self::HeightEndFrame,
        Self::HeightTrueMin,
        Self::HeightTrueMax,
    ];

    pub const fn field_name(self) -> &'static str {
        match self {
            Self::HeightFrameStart => "sg_height_frame_start",
            Self::HeightEndFrame => "sg_height_end_frame",
            Self::HeightTrueMin => "sg_height_true_min",
            Self::HeightTrueMax => "sg_height_true_max",
        }
    }
}

impl fmt::Display for DerivedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for DerivedField {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.field_name() == value)
            .ok_or_else(|| ModelError::UnknownDerivedField(value.to_string()))
    }
}

/// Formatted values the batch updater writes back to a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFields {
    pub height: String,
    pub speed: String,
    pub tilt: String,
    pub lens: String,
    pub height_frame_start: String,
    pub height_end_frame: String,
    pub height_true_min: String,
    pub height_true_max: String,
}

impl SubmissionFields {
    /// Update payload, including the updated marker.
    pub fn to_payload(&self) -> Map<String, Value> {
        let entries = [
            ("sg_height", &self.height),
            ("sg_speed", &self.speed),
            ("sg_tilt", &self.tilt),
            ("sg_lens_1", &self.lens),
            (
                DerivedField::HeightFrameStart.field_name(),
                &self.height_frame_start,
            ),
            (
                DerivedField::HeightEndFrame.field_name(),
                &self.height_end_frame,
            ),
            (DerivedField::HeightTrueMin.field_name(), &self.height_true_min),
            (DerivedField::HeightTrueMax.field_name(), &self.height_true_max),
        ];
        let mut payload: Map<String, Value> = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.clone())))
            .collect();
        payload.insert(
            UPDATED_MARKER_FIELD.to_string(),
            Value::String(UPDATED_MARKER_VALUE.to_string()),
        );
        payload
    }
}
