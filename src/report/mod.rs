pub mod json;
pub mod summary;
pub mod tally;
pub mod terminal;
pub mod workbook;

use std::path::PathBuf;

use serde::Serialize;

use summary::Summary;

/// Outcome for one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Export that was read
    pub input: PathBuf,

    /// Summary that was written; `None` when the file was skipped
    pub output: Option<PathBuf>,

    /// Recoverable anomalies hit while reading (missing sheets/columns)
    pub anomalies: Vec<String>,

    /// Rows written to the output
    pub summary: Summary,

    /// Number of classified issues
    pub total: u64,
}

/// Everything one run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Tool version
    pub version: String,

    /// When the run happened
    pub timestamp: String,

    /// Directory the exports were read from
    pub input_dir: PathBuf,

    /// One entry per discovered export, in processing order
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn files_written(&self) -> usize {
        self.files.iter().filter(|f| f.output.is_some()).count()
    }
}
