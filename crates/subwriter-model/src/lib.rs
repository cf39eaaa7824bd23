//! Data model for playlist submission exports.
//!
//! - **mapping**: Header to source-field mapping config (primary and derived groups)
//! - **record**: Tracker records (versions, playlists, shots) and value display
//! - **camera**: Sidecar JSON documents and per-frame camera attributes
//! - **metrics**: Derived height metrics and batch-update submission fields
//! - **sheet**: Spreadsheet cells and rows produced by an export

pub mod camera;
pub mod error;
pub mod mapping;
pub mod metrics;
pub mod record;
pub mod sheet;

pub use camera::{AttributeSeries, CameraAttribute, CompSidecar, ShotMetadata, ValueRange};
pub use error::{ModelError, Result};
pub use mapping::{FieldGroup, FieldMapping, FieldMappingConfig};
pub use metrics::{DerivedField, HeightMetrics, SubmissionFields};
pub use record::{
    CODE_FIELD, EntityLink, Playlist, Project, SIDECAR_PATH_FIELD, Shot, UPDATED_MARKER_FIELD,
    UPDATED_MARKER_VALUE, VersionRecord, display_value,
};
pub use sheet::{Cell, Sheet};
