//! Tests for spreadsheet output.

use std::path::{Path, PathBuf};

use subwriter_model::{Cell, Sheet};
use subwriter_output::{OutputFormat, write_csv_to, write_sheet};
use tempfile::TempDir;

fn delivery_sheet() -> Sheet {
    let mut sheet = Sheet::new(
        ["Shot Number", "Assets", "Height", "Height Start"]
            .map(String::from)
            .to_vec(),
    );
    sheet.push_row(vec![
        Cell::text("A1"),
        Cell::text("car, drone"),
        Cell::text("1.23 -> 6.79"),
        Cell::Number(2.34),
    ]);
    sheet.push_row(vec![
        Cell::text("B2"),
        Cell::Empty,
        Cell::text("N/A"),
        Cell::Empty,
    ]);
    sheet
}

#[test]
fn test_csv_snapshot() {
    let mut buffer = Vec::new();
    write_csv_to(&delivery_sheet(), &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    insta::assert_snapshot!(text, @r#"
    Shot Number,Assets,Height,Height Start
    A1,"car, drone",1.23 -> 6.79,2.34
    B2,,N/A,
    "#);
}

#[test]
fn test_write_sheet_creates_submission_dir() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("submissions").join("0412").join("DELIVERY.csv");

    write_sheet(&delivery_sheet(), &path, OutputFormat::Csv).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("Shot Number,"));
}

#[test]
fn test_write_sheet_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("DELIVERY.xlsx");
    std::fs::write(&path, b"stale").unwrap();

    write_sheet(&delivery_sheet(), &path, OutputFormat::Xlsx).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_ne!(bytes, b"stale");
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_write_into_file_path_fails_with_path() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();
    let path = blocker.join("DELIVERY.csv");

    let err = write_sheet(&delivery_sheet(), &path, OutputFormat::Csv).unwrap_err();

    assert_eq!(err.path().map(PathBuf::as_path), Some(blocker.as_path()));
    assert!(!err.is_locked());
    assert!(err.user_message().contains("not-a-dir"));
}

#[test]
fn test_header_only_sheet() {
    let sheet = Sheet::new(vec!["Shot Number".to_string()]);
    let mut buffer = Vec::new();
    write_csv_to(&sheet, &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "Shot Number\n");
    assert_eq!(OutputFormat::from_path(Path::new("x.csv")), Some(OutputFormat::Csv));
}
