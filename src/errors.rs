use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while summarizing one export file.
///
/// The first three variants are anomalies in otherwise readable input: they
/// are reported and processing moves on. The rest are structural faults and
/// end the run.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("sheet '{sheet}' not found in {}", .file.display())]
    MissingSheet { sheet: String, file: PathBuf },

    #[error("column(s) {} not found in {table}", quoted(.columns))]
    MissingColumn { columns: Vec<String>, table: String },

    #[error("unsupported file type: {}", .file.display())]
    UnsupportedExtension { file: PathBuf },

    #[error("failed to read workbook {}: {source}", .file.display())]
    Workbook {
        file: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("failed to process delimited file {}: {source}", .file.display())]
    Delimited {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write summary {}: {source}", .file.display())]
    Xlsx {
        file: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SummaryError {
    /// Anomalies that are reported and skipped rather than ending the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SummaryError::MissingSheet { .. }
                | SummaryError::MissingColumn { .. }
                | SummaryError::UnsupportedExtension { .. }
        )
    }
}

/// Failures while pulling issues and metrics from a SonarQube server.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no analysis data found for project '{project}'")]
    NoAnalysis { project: String },

    #[error("failed to write {}: {source}", .file.display())]
    Csv {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn quoted(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(", ")
}
