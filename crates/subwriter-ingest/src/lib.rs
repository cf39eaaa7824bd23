//! Loading for submission exports.
//!
//! - **Field mapping**: the ordered header → field config file
//! - **Sidecar chain**: comp sidecar → shot metadata JSON for a version
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use subwriter_ingest::{load_field_mapping, resolve_shot_metadata};
//!
//! let config = load_field_mapping(Path::new("submission_fields.json"))?;
//! if let Some(metadata) = resolve_shot_metadata(&version) {
//!     // derive camera metrics
//! }
//! ```

mod config;
mod error;
mod sidecar;

// === Error Types ===
pub use error::{ConfigError, MetadataError, Result};

// === Field Mapping ===
pub use config::load_field_mapping;

// === Sidecar Chain ===
pub use sidecar::{load_shot_metadata, resolve_shot_metadata};
