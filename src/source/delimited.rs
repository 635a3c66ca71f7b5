use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::errors::SummaryError;
use crate::source::Table;

/// Read a comma-separated export with a header row. Ragged rows are
/// accepted; missing trailing cells read as empty.
pub fn read_table(path: &Path) -> Result<Table, SummaryError> {
    let wrap = |source: csv::Error| SummaryError::Delimited {
        file: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(wrap)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(wrap)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(wrap)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(
        "Read {}: {} columns, {} rows",
        path.display(),
        headers.len(),
        rows.len()
    );

    Ok(Table::new(path.display().to_string(), headers, rows))
}
