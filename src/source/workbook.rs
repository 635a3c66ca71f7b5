use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::debug;

use crate::errors::SummaryError;
use crate::source::Table;

/// An opened `.xlsx` export. Dropped (and the file closed) once the
/// dispatcher is done with the file.
pub struct ExportWorkbook {
    path: PathBuf,
    inner: Xlsx<BufReader<File>>,
}

impl ExportWorkbook {
    pub fn open(path: &Path) -> Result<Self, SummaryError> {
        let inner: Xlsx<_> = open_workbook(path).map_err(|source| SummaryError::Workbook {
            file: path.to_path_buf(),
            source,
        })?;
        Ok(ExportWorkbook {
            path: path.to_path_buf(),
            inner,
        })
    }

    /// Read a sheet by exact name. Row 1 is the header; when row 1 is
    /// blank the header is empty and every used row is data, so required
    /// columns come up missing.
    pub fn sheet(&mut self, name: &str) -> Result<Table, SummaryError> {
        if !self.inner.sheet_names().iter().any(|s| s == name) {
            return Err(SummaryError::MissingSheet {
                sheet: name.to_string(),
                file: self.path.clone(),
            });
        }

        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|source| SummaryError::Workbook {
                file: self.path.clone(),
                source,
            })?;

        let mut rows = range.rows().map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
        let headers = match range.start() {
            Some((0, _)) => rows.next().unwrap_or_default(),
            _ => Vec::new(),
        };
        let rows: Vec<Vec<String>> = rows.collect();

        debug!(
            "Read sheet '{}' from {}: {} columns, {} rows",
            name,
            self.path.display(),
            headers.len(),
            rows.len()
        );

        Ok(Table::new(
            format!("{} [{}]", self.path.display(), name),
            headers,
            rows,
        ))
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
