pub mod file_walker;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::classify::delimited::DelimitedClassifier;
use crate::classify::hotspots::HotspotClassifier;
use crate::classify::issues::IssueSheetClassifier;
use crate::classify::RowClassifier;
use crate::cli::RunArgs;
use crate::config::SummaryConfig;
use crate::errors::SummaryError;
use crate::report::summary::Summary;
use crate::report::tally::Tally;
use crate::report::{self, FileReport, RunReport};
use crate::source::{self, workbook::ExportWorkbook, Table};

/// The summary engine. Discovers exports, dispatches each one to the
/// classifiers for its format, and writes one summary per file.
pub struct Summarizer {
    /// Directory the exports are read from
    input_dir: PathBuf,
    /// Workbook sheet with the full issue list
    issues_sheet: String,
    /// Workbook sheet with security hotspots
    hotspots_sheet: String,
    /// Output name suffix
    suffix: String,
}

impl Summarizer {
    pub fn new(args: &RunArgs) -> Result<Self> {
        let config = if args.no_config {
            SummaryConfig::default()
        } else {
            SummaryConfig::load(&std::env::current_dir()?).unwrap_or_default()
        };

        let input_dir = args.input.clone().unwrap_or_else(|| config.input.dir.clone());
        Ok(Self::with_config(input_dir, &config))
    }

    pub fn with_config(input_dir: PathBuf, config: &SummaryConfig) -> Self {
        Summarizer {
            input_dir,
            issues_sheet: config.sheets.issues.clone(),
            hotspots_sheet: config.sheets.hotspots.clone(),
            suffix: config.output.suffix.clone(),
        }
    }

    /// Summarize every export in the input directory, one file at a time
    pub fn run(&self) -> Result<RunReport> {
        info!("Discovering exports in {}", self.input_dir.display());
        let inputs = file_walker::discover_exports(&self.input_dir, &self.suffix)?;
        info!("Found {} export(s)", inputs.len());

        let mut files = Vec::with_capacity(inputs.len());
        for path in &inputs {
            files.push(self.process_file(path)?);
        }

        let report = RunReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            input_dir: self.input_dir.clone(),
            files,
        };
        info!("Wrote {} summary file(s)", report.files_written());
        Ok(report)
    }

    /// Classify one export into a fresh tally and write its summary
    /// workbook, whatever the input's extension.
    ///
    /// Missing sheets and columns are recorded as anomalies and the summary
    /// is still written. Unsupported extensions are skipped without output.
    pub fn process_file(&self, path: &Path) -> Result<FileReport> {
        info!("Processing file: {}", path.display());

        let mut anomalies = Vec::new();
        let tally = match self.classify_file(path, Tally::new(), &mut anomalies) {
            Ok(tally) => tally,
            Err(e @ SummaryError::UnsupportedExtension { .. }) => {
                warn!("{}", e);
                anomalies.push(e.to_string());
                return Ok(FileReport {
                    input: path.to_path_buf(),
                    output: None,
                    anomalies,
                    summary: Summary::default(),
                    total: 0,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if tally.is_empty() {
            debug!("No issues classified in {}", path.display());
        }

        let summary = Summary::from_tally(&tally);
        let output = output_path(path, &self.suffix);
        report::workbook::write(&output, &summary)?;
        info!(
            "Summary written to {} ({} rows, {} issues)",
            output.display(),
            summary.rows.len(),
            summary.total()
        );

        Ok(FileReport {
            input: path.to_path_buf(),
            output: Some(output),
            anomalies,
            total: summary.total(),
            summary,
        })
    }

    /// Pick the classifiers for the file's format and run them. The tally
    /// is threaded through and handed back to the caller.
    fn classify_file(
        &self,
        path: &Path,
        mut tally: Tally,
        anomalies: &mut Vec<String>,
    ) -> Result<Tally, SummaryError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("xlsx") => {
                let mut workbook = ExportWorkbook::open(path)?;
                let issues = workbook.sheet(&self.issues_sheet);
                apply(issues, &IssueSheetClassifier, &mut tally, anomalies)?;
                let hotspots = workbook.sheet(&self.hotspots_sheet);
                apply(hotspots, &HotspotClassifier, &mut tally, anomalies)?;
            }
            Some("csv") => {
                let table = source::delimited::read_table(path)?;
                apply(Ok(table), &DelimitedClassifier, &mut tally, anomalies)?;
            }
            _ => {
                return Err(SummaryError::UnsupportedExtension {
                    file: path.to_path_buf(),
                })
            }
        }
        Ok(tally)
    }
}

/// Run one classifier over a table read. Recoverable anomalies are logged
/// and collected; faults are returned.
fn apply(
    table: Result<Table, SummaryError>,
    classifier: &dyn RowClassifier,
    tally: &mut Tally,
    anomalies: &mut Vec<String>,
) -> Result<(), SummaryError> {
    match table.and_then(|t| classifier.classify(&t, tally)) {
        Ok(rows) => {
            debug!("{}: {} rows counted", classifier.name(), rows);
            Ok(())
        }
        Err(e) if e.is_recoverable() => {
            warn!("{}", e);
            anomalies.push(e.to_string());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// `dir/report.xlsx` -> `dir/report<suffix>.xlsx`
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = input.file_stem().unwrap_or_default().to_os_string();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}
