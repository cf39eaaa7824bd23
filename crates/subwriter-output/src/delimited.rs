//! CSV output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use subwriter_model::Sheet;

use crate::error::{OutputError, Result};

/// Writes the sheet as CSV to any writer.
pub fn write_csv_to<W: Write>(sheet: &Sheet, writer: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the sheet as a CSV file.
pub fn write_csv(sheet: &Sheet, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv_to(sheet, file).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = sheet.row_count(), "Wrote CSV");
    Ok(())
}
