//! Sidecar JSON chain loading.
//!
//! A version points at a comp sidecar; the comp sidecar points at the shot
//! metadata file holding the camera frame data.

use std::path::Path;

use serde::de::DeserializeOwned;
use subwriter_model::{CompSidecar, ShotMetadata, VersionRecord};

use crate::error::MetadataError;

/// Loads the shot metadata for a version by following its sidecar chain.
///
/// Returns the reason the chain could not be followed instead of panicking
/// or logging; use [`resolve_shot_metadata`] when the caller only needs to
/// know whether to skip the version.
pub fn load_shot_metadata(version: &VersionRecord) -> Result<ShotMetadata, MetadataError> {
    let sidecar_path =
        version
            .sidecar_path()
            .ok_or_else(|| MetadataError::MissingSidecarPath {
                version: version_label(version),
            })?;
    let sidecar: CompSidecar = read_json(&sidecar_path)?;
    let shot_path = sidecar
        .shot_data_path()
        .ok_or_else(|| MetadataError::MissingDataPath {
            path: sidecar_path.clone(),
        })?;

    tracing::debug!(
        version = %version_label(version),
        sidecar = %sidecar_path.display(),
        shot_metadata = %shot_path.display(),
        "Resolved sidecar chain"
    );
    read_json(shot_path)
}

/// Loads the shot metadata for a version, logging a warning and returning
/// `None` when any link in the chain is missing or unreadable.
pub fn resolve_shot_metadata(version: &VersionRecord) -> Option<ShotMetadata> {
    match load_shot_metadata(version) {
        Ok(metadata) => Some(metadata),
        Err(error) => {
            tracing::warn!(version = %version_label(version), %error, "skipping shot metadata");
            None
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, MetadataError> {
    let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| MetadataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn version_label(version: &VersionRecord) -> String {
    match version.code() {
        "" => format!("#{}", version.id),
        code => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subwriter_model::{CameraAttribute, SIDECAR_PATH_FIELD, ValueRange};
    use tempfile::TempDir;

    const SHOT_JSON: &str = r#"{"maya": {"frame_data": {
        "realHeight": {"range": {"min": 1.234, "max": 5.678},
                       "values": {"1001": 1.234, "1002": 5.678}}
    }}}"#;

    fn write_chain(dir: &TempDir, shot_json: &str) -> std::path::PathBuf {
        let shot_path = dir.path().join("shot_meta.json");
        std::fs::write(&shot_path, shot_json).unwrap();
        let comp_path = dir.path().join("comp_meta.json");
        let comp = serde_json::json!({"comp": {"data_paths": [shot_path]}});
        std::fs::write(&comp_path, comp.to_string()).unwrap();
        comp_path
    }

    fn version_with_sidecar(path: &Path) -> VersionRecord {
        VersionRecord::new(42)
            .with_attribute("code", "sh010_comp_v003")
            .with_attribute(SIDECAR_PATH_FIELD, path.to_string_lossy().into_owned())
    }

    #[test]
    fn test_follows_chain() {
        let dir = TempDir::new().unwrap();
        let comp_path = write_chain(&dir, SHOT_JSON);

        let metadata = load_shot_metadata(&version_with_sidecar(&comp_path)).unwrap();

        assert_eq!(
            metadata.range(CameraAttribute::RealHeight),
            Some(ValueRange::new(1.234, 5.678))
        );
    }

    #[test]
    fn test_missing_sidecar_path() {
        let version = VersionRecord::new(7).with_attribute("code", "sh020_comp_v001");
        let err = load_shot_metadata(&version).unwrap_err();
        assert!(matches!(err, MetadataError::MissingSidecarPath { .. }));
        assert!(resolve_shot_metadata(&version).is_none());
    }

    #[test]
    fn test_missing_sidecar_file() {
        let dir = TempDir::new().unwrap();
        let version = version_with_sidecar(&dir.path().join("gone.json"));
        let err = load_shot_metadata(&version).unwrap_err();
        assert!(matches!(err, MetadataError::Read { .. }));
    }

    #[test]
    fn test_empty_data_paths() {
        let dir = TempDir::new().unwrap();
        let comp_path = dir.path().join("comp_meta.json");
        std::fs::write(&comp_path, r#"{"comp": {"data_paths": []}}"#).unwrap();
        let err = load_shot_metadata(&version_with_sidecar(&comp_path)).unwrap_err();
        assert!(matches!(err, MetadataError::MissingDataPath { .. }));
    }

    #[test]
    fn test_unreadable_shot_json() {
        let dir = TempDir::new().unwrap();
        let comp_path = write_chain(&dir, "{ not json");
        let err = load_shot_metadata(&version_with_sidecar(&comp_path)).unwrap_err();
        assert!(matches!(err, MetadataError::Parse { .. }));
        assert!(resolve_shot_metadata(&version_with_sidecar(&comp_path)).is_none());
    }
}
