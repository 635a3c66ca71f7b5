use tracing::debug;

use crate::classify::RowClassifier;
use crate::errors::SummaryError;
use crate::report::tally::Tally;
use crate::source::Table;
use crate::taxonomy;

/// Reads the security hotspot sheet. Every row is a security issue.
pub struct HotspotClassifier;

impl RowClassifier for HotspotClassifier {
    fn name(&self) -> &str {
        "hotspots"
    }

    fn description(&self) -> &str {
        "Workbook hotspot sheet: every row counted as Code Security"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["Severity"]
    }

    fn classify(&self, table: &Table, tally: &mut Tally) -> Result<usize, SummaryError> {
        let severity_idx = table.require_columns(self.required_columns())?[0];

        for row in &table.rows {
            let (category, label) = taxonomy::classify_hotspot(Table::cell(row, severity_idx));
            tally.record(category, label);
        }

        debug!("Classified {} hotspot rows from {}", table.rows.len(), table.name);
        Ok(table.rows.len())
    }
}
