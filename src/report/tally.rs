use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::taxonomy::Category;

/// Per-file aggregate: category -> severity label -> count.
///
/// Categories keep the order in which they were first recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: IndexMap<Category, BTreeMap<String, u64>>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: Category, severity: impl Into<String>) {
        *self
            .counts
            .entry(category)
            .or_default()
            .entry(severity.into())
            .or_insert(0) += 1;
    }

    #[cfg(test)]
    pub fn count(&self, category: Category, severity: &str) -> u64 {
        self.counts
            .get(&category)
            .and_then(|s| s.get(severity))
            .copied()
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.counts.values().flat_map(|s| s.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Categories in first-seen order with their severity counts.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &BTreeMap<String, u64>)> {
        self.counts.iter().map(|(c, s)| (*c, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_count() {
        let mut tally = Tally::new();
        tally.record(Category::CodeDuplication, "High");
        tally.record(Category::CodeDuplication, "High");
        tally.record(Category::Other, "INFO");

        assert_eq!(tally.count(Category::CodeDuplication, "High"), 2);
        assert_eq!(tally.count(Category::CodeDuplication, "Low"), 0);
        assert_eq!(tally.count(Category::CodeChurn, "High"), 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let mut tally = Tally::new();
        tally.record(Category::Other, "MINOR");
        tally.record(Category::CodeBugIssues, "Low");
        tally.record(Category::Other, "MAJOR");
        tally.record(Category::CyclomaticComplexity, "Complex");

        let order: Vec<Category> = tally.iter().map(|(c, _)| c).collect();
        assert_eq!(
            order,
            vec![
                Category::Other,
                Category::CodeBugIssues,
                Category::CyclomaticComplexity
            ]
        );
    }

    #[test]
    fn test_new_tally_is_empty() {
        let tally = Tally::new();
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
    }
}
