//! Spreadsheet output for submission exports.
//!
//! - **XLSX**: single worksheet, bold header row, frozen header pane
//! - **CSV**: header record then one record per row

mod delimited;
mod error;
mod format;
mod xlsx;

use std::fs;
use std::path::Path;

use subwriter_model::Sheet;

pub use delimited::{write_csv, write_csv_to};
pub use error::{OutputError, Result};
pub use format::OutputFormat;
pub use xlsx::write_xlsx;

/// Writes a sheet in the given format, creating the parent directory if
/// needed. An existing file at `path` is replaced.
pub fn write_sheet(sheet: &Sheet, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    match format {
        OutputFormat::Xlsx => write_xlsx(sheet, path)?,
        OutputFormat::Csv => write_csv(sheet, path)?,
    }
    tracing::info!(
        path = %path.display(),
        format = %format,
        rows = sheet.row_count(),
        "Spreadsheet written"
    );
    Ok(())
}
