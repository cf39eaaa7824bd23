//! Error types for config and sidecar loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading the field mapping config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON or has the wrong shape.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The primary (`Shotgun`) group has no columns.
    #[error("config {path} has no columns in the \"Shotgun\" group")]
    EmptyPrimaryGroup { path: PathBuf },
}

/// Reasons a version's shot metadata could not be loaded.
///
/// Every variant means "skip this version"; none is fatal to a run.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The version has no sidecar path attribute.
    #[error("version {version} has no sidecar path")]
    MissingSidecarPath { version: String },

    /// The comp sidecar has no `comp.data_paths[0]`.
    #[error("sidecar {path} has no shot metadata path")]
    MissingDataPath { path: PathBuf },

    /// A file in the chain could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file in the chain is not valid JSON or has the wrong shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for config loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MetadataError::MissingSidecarPath {
            version: "sh010_v001".to_string(),
        };
        assert_eq!(err.to_string(), "version sh010_v001 has no sidecar path");

        let err = ConfigError::EmptyPrimaryGroup {
            path: PathBuf::from("/cfg/fields.json"),
        };
        assert_eq!(
            err.to_string(),
            "config /cfg/fields.json has no columns in the \"Shotgun\" group"
        );
    }
}
