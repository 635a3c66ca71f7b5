pub mod delimited;
pub mod hotspots;
pub mod issues;

use crate::errors::SummaryError;
use crate::report::tally::Tally;
use crate::source::Table;

/// Turns the rows of one export table into tally entries.
///
/// Each classifier handles one input shape. Required columns are checked
/// before any row is counted, so a table with a missing column contributes
/// nothing.
pub trait RowClassifier {
    /// Classifier name (e.g. "issues", "hotspots")
    fn name(&self) -> &str;

    /// Short description of the table shape this classifier reads
    fn description(&self) -> &str;

    /// Columns that must be present in the header
    fn required_columns(&self) -> &'static [&'static str];

    /// Count every row of `table` into `tally`, returning the number of
    /// rows counted
    fn classify(&self, table: &Table, tally: &mut Tally) -> Result<usize, SummaryError>;
}

/// Registry of all classifiers
pub fn all_classifiers() -> Vec<Box<dyn RowClassifier>> {
    vec![
        Box::new(issues::IssueSheetClassifier),
        Box::new(hotspots::HotspotClassifier),
        Box::new(delimited::DelimitedClassifier),
    ]
}
