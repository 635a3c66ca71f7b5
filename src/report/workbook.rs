use std::path::Path;

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook, XlsxError};

use crate::errors::SummaryError;
use crate::report::summary::{Summary, HEADER};

/// Name of the single sheet in every summary workbook.
pub const SHEET_NAME: &str = "Summary";

/// Write the summary as a one-sheet `.xlsx` workbook.
pub fn write(path: &Path, summary: &Summary) -> Result<(), SummaryError> {
    build(path, summary).map_err(|source| SummaryError::Xlsx {
        file: path.to_path_buf(),
        source,
    })
}

fn build(path: &Path, summary: &Summary) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();

    // Pin the creation time so identical input gives identical bytes
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }

    for (i, row) in summary.rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, row.category.as_str())?;
        sheet.write_string(r, 1, row.severity.as_str())?;
        sheet.write_number(r, 2, row.count as f64)?;
    }

    workbook.save(path)?;
    Ok(())
}
