//! Sidecar JSON documents.
//!
//! A version's comp sidecar points at a shot metadata file:
//!
//! ```json
//! { "comp": { "data_paths": ["/shots/sh010/shot_meta.json"] } }
//! ```
//!
//! The shot metadata file holds per-attribute ranges and frame series:
//!
//! ```json
//! { "maya": { "frame_data": {
//!     "realHeight": { "range": {"min": 1.2, "max": 4.8},
//!                     "values": {"1001": 1.2, "1002": 1.9} }
//! } } }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::ModelError;

/// Camera attributes tracked per frame in shot metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraAttribute {
    RealHeight,
    Speed,
    RealTilt,
    Lens,
}

impl CameraAttribute {
    pub const ALL: [Self; 4] = [Self::RealHeight, Self::Speed, Self::RealTilt, Self::Lens];

    /// Key under `maya.frame_data`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::RealHeight => "realHeight",
            Self::Speed => "speed",
            Self::RealTilt => "realTilt",
            Self::Lens => "Lens",
        }
    }
}

impl fmt::Display for CameraAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CameraAttribute {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.key() == value)
            .ok_or_else(|| ModelError::UnknownCameraAttribute(value.to_string()))
    }
}

/// First file of the sidecar chain, written by the comp publish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompSidecar {
    pub comp: CompSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompSection {
    #[serde(default)]
    pub data_paths: Vec<PathBuf>,
}

impl CompSidecar {
    /// The shot metadata path (`comp.data_paths[0]`), if present and non-empty.
    pub fn shot_data_path(&self) -> Option<&Path> {
        self.comp
            .data_paths
            .first()
            .map(PathBuf::as_path)
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Second file of the sidecar chain: frame-level camera metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotMetadata {
    pub maya: MayaSection,
}

/// Attributes under `maya.frame_data`, kept as raw JSON.
///
/// Publishes add attributes of their own (camera names, flags) next to the
/// camera metrics, so only the [`CameraAttribute`] keys are decoded, on
/// access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MayaSection {
    #[serde(default)]
    pub frame_data: BTreeMap<String, Value>,
}

/// Declared range and frame-indexed values for one attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSeries {
    #[serde(default)]
    pub range: Option<ValueRange>,
    /// Values keyed by frame number as a string (`"1001"`).
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl ShotMetadata {
    /// Decodes one camera attribute; `None` when absent or malformed.
    pub fn attribute(&self, attribute: CameraAttribute) -> Option<AttributeSeries> {
        let raw = self.maya.frame_data.get(attribute.key())?;
        AttributeSeries::deserialize(raw).ok()
    }

    /// Declared range for an attribute.
    pub fn range(&self, attribute: CameraAttribute) -> Option<ValueRange> {
        self.attribute(attribute).and_then(|series| series.range)
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: CameraAttribute, series: AttributeSeries) -> Self {
        self.maya
            .frame_data
            .insert(attribute.key().to_string(), series.into());
        self
    }
}

impl AttributeSeries {
    pub fn new(range: ValueRange) -> Self {
        Self {
            range: Some(range),
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, frame: impl Into<String>, value: f64) -> Self {
        self.values.insert(frame.into(), Value::from(value));
        self
    }

    /// Frame values that are numbers; nulls and other types are skipped.
    pub fn numeric_values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values
            .iter()
            .filter_map(|(frame, value)| Some((frame.as_str(), value.as_f64()?)))
    }
}

impl From<AttributeSeries> for Value {
    fn from(series: AttributeSeries) -> Self {
        let mut object = Map::new();
        if let Some(range) = series.range {
            object.insert("range".to_string(), json!({"min": range.min, "max": range.max}));
        }
        object.insert("values".to_string(), Value::Object(series.values.into_iter().collect()));
        Value::Object(object)
    }
}
