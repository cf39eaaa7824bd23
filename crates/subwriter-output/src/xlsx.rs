//! XLSX workbook output.

use std::path::Path;

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use subwriter_model::{Cell, Sheet};

use crate::error::{OutputError, Result};

/// Writes the sheet as a single-worksheet workbook with a bold header row.
pub fn write_xlsx(sheet: &Sheet, path: &Path) -> Result<()> {
    let columns = sheet
        .headers
        .len()
        .max(sheet.rows.iter().map(Vec::len).max().unwrap_or(0));
    if ColNum::try_from(columns).is_err() {
        return Err(OutputError::TooManyColumns { columns });
    }
    if RowNum::try_from(sheet.rows.len() + 1).is_err() {
        return Err(OutputError::TooManyRows {
            rows: sheet.rows.len(),
        });
    }

    let xlsx_err = |source| OutputError::Xlsx {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    fill_worksheet(worksheet, sheet).map_err(xlsx_err)?;
    workbook.save(path).map_err(xlsx_err)?;

    tracing::debug!(path = %path.display(), rows = sheet.row_count(), "Wrote workbook");
    Ok(())
}

// Callers check sheet bounds first; the index casts cannot truncate.
fn fill_worksheet(worksheet: &mut Worksheet, sheet: &Sheet) -> std::result::Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, header, &bold)?;
    }

    for (index, row) in sheet.rows.iter().enumerate() {
        let row_num = (index + 1) as RowNum;
        for (col, cell) in row.iter().enumerate() {
            let col = col as ColNum;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet.write_string(row_num, col, text)?;
                }
                Cell::Number(number) => {
                    worksheet.write_number(row_num, col, *number)?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();
    Ok(())
}
