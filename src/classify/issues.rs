use tracing::debug;

use crate::classify::RowClassifier;
use crate::errors::SummaryError;
use crate::report::tally::Tally;
use crate::source::Table;
use crate::taxonomy;

/// Issue type that short-circuits keyword matching
const BUG_TYPE: &str = "BUG";

/// Reads the workbook's main issue sheet: bugs by `type`, everything else
/// by keywords in `message`.
pub struct IssueSheetClassifier;

impl RowClassifier for IssueSheetClassifier {
    fn name(&self) -> &str {
        "issues"
    }

    fn description(&self) -> &str {
        "Workbook issue sheet: BUG rows by type, the rest by message keywords"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["message", "type", "severity"]
    }

    fn classify(&self, table: &Table, tally: &mut Tally) -> Result<usize, SummaryError> {
        let cols = table.require_columns(self.required_columns())?;
        let (message_idx, type_idx, severity_idx) = (cols[0], cols[1], cols[2]);

        for row in &table.rows {
            let severity = Table::cell(row, severity_idx);
            let (category, label) = if Table::cell(row, type_idx) == BUG_TYPE {
                taxonomy::classify_bug(severity)
            } else {
                taxonomy::classify_message(Table::cell(row, message_idx), severity)
            };
            tally.record(category, label);
        }

        debug!("Classified {} issue rows from {}", table.rows.len(), table.name);
        Ok(table.rows.len())
    }
}
