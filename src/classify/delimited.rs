use tracing::debug;

use crate::classify::RowClassifier;
use crate::errors::SummaryError;
use crate::report::tally::Tally;
use crate::source::Table;
use crate::taxonomy;

/// Reads a comma-separated issue export. There is no bug distinction in
/// this shape; rows matching no keyword are counted once under `Other`.
pub struct DelimitedClassifier;

impl RowClassifier for DelimitedClassifier {
    fn name(&self) -> &str {
        "delimited"
    }

    fn description(&self) -> &str {
        "CSV export: every row by message keywords, unmatched rows under Other"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["message", "severity"]
    }

    fn classify(&self, table: &Table, tally: &mut Tally) -> Result<usize, SummaryError> {
        let cols = table.require_columns(self.required_columns())?;
        let (message_idx, severity_idx) = (cols[0], cols[1]);

        for row in &table.rows {
            let (category, label) = taxonomy::classify_message(
                Table::cell(row, message_idx),
                Table::cell(row, severity_idx),
            );
            tally.record(category, label);
        }

        debug!("Classified {} rows from {}", table.rows.len(), table.name);
        Ok(table.rows.len())
    }
}
