use serde::Serialize;

use crate::report::tally::Tally;
use crate::taxonomy::Category;

/// Column headers of every summary table.
pub const HEADER: [&str; 3] = ["Category", "Severity", "Count"];

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub category: Category,
    pub severity: String,
    pub count: u64,
}

/// The ordered rows written for one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    /// Order a tally for output: categories as first seen, severities by
    /// the category's scale or else by label.
    pub fn from_tally(tally: &Tally) -> Self {
        let mut rows = Vec::new();
        for (category, severities) in tally.iter() {
            let mut entries: Vec<(&String, &u64)> = severities.iter().collect();
            entries.sort_by(|a, b| category.compare_labels(a.0, b.0));
            rows.extend(entries.into_iter().map(|(severity, count)| SummaryRow {
                category,
                severity: severity.clone(),
                count: *count,
            }));
        }
        Summary { rows }
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
