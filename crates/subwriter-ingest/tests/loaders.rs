//! Tests for config and sidecar loading from disk.

use std::path::Path;

use serde_json::json;
use subwriter_ingest::{ConfigError, MetadataError, load_field_mapping, load_shot_metadata};
use subwriter_model::{CameraAttribute, SIDECAR_PATH_FIELD, VersionRecord};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn version_with_sidecar(path: &Path) -> VersionRecord {
    VersionRecord::new(1)
        .with_attribute("code", "sh010_comp_v007")
        .with_attribute(SIDECAR_PATH_FIELD, path.to_string_lossy().into_owned())
}

#[test]
fn test_load_field_mapping_with_unknown_derived_field() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "columns.json",
        r#"{
            "Shotgun": {"Shot Number": "sg_shot_number", "Submitted For": "sg_submitted_for"},
            "External": {"Height Start": "sg_height_frame_start", "Focus": "sg_focus"}
        }"#,
    );

    let config = load_field_mapping(&path).unwrap();

    assert_eq!(config.primary.len(), 2);
    assert_eq!(config.derived.field_for("Focus"), Some("sg_focus"));
}

#[test]
fn test_load_field_mapping_errors() {
    let dir = TempDir::new().unwrap();

    let missing = load_field_mapping(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, ConfigError::Read { .. }));

    let path = write(&dir, "no_primary.json", r#"{"External": {}}"#);
    let err = load_field_mapping(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));

    let path = write(&dir, "empty.json", r#"{"Shotgun": {}}"#);
    let err = load_field_mapping(&path).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyPrimaryGroup { .. }));
}

#[test]
fn test_sidecar_chain_across_directories() {
    let dir = TempDir::new().unwrap();
    let maya_dir = dir.path().join("maya");
    std::fs::create_dir(&maya_dir).unwrap();
    let shot_path = maya_dir.join("sh010_meta.json");
    std::fs::write(
        &shot_path,
        json!({"maya": {"frame_data": {
            "Lens": {"range": {"min": 24.0, "max": 70.5}, "values": {"1001": 24.0}}
        }}})
        .to_string(),
    )
    .unwrap();
    let comp_path = write(
        &dir,
        "comp.json",
        &json!({"comp": {"data_paths": [shot_path, "/unused/second.json"]}}).to_string(),
    );

    let metadata = load_shot_metadata(&version_with_sidecar(&comp_path)).unwrap();

    assert_eq!(metadata.range(CameraAttribute::Lens).map(|r| r.min), Some(24.0));
}

#[test]
fn test_missing_shot_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let comp_path = write(
        &dir,
        "comp.json",
        &json!({"comp": {"data_paths": [dir.path().join("gone.json")]}}).to_string(),
    );

    let err = load_shot_metadata(&version_with_sidecar(&comp_path)).unwrap_err();

    let MetadataError::Read { path, .. } = err else {
        panic!("expected read error, got {err}");
    };
    assert!(path.ends_with("gone.json"));
}

#[test]
fn test_extra_frame_data_attributes_are_ignored() {
    let dir = TempDir::new().unwrap();
    let shot_path = write(
        &dir,
        "shot.json",
        &json!({"maya": {"frame_data": {
            "realHeight": {"range": {"min": 1.0, "max": 2.0}, "values": {"1001": 1.0, "1002": 2.0}},
            "speed": {"range": {"min": 0.0, "max": 3.0}, "values": {}},
            "realTilt": {"range": {"min": -1.0, "max": 1.0}, "values": {}},
            "Lens": {"range": {"min": 35.0, "max": 35.0}, "values": {}},
            "cameraName": {"values": {"1001": "shotCam"}}
        }}})
        .to_string(),
    );
    let comp_path = write(
        &dir,
        "comp.json",
        &json!({"comp": {"data_paths": [shot_path]}}).to_string(),
    );

    let metadata = load_shot_metadata(&version_with_sidecar(&comp_path)).unwrap();

    for attribute in CameraAttribute::ALL {
        assert!(metadata.range(attribute).is_some(), "{attribute} should decode");
    }
}
