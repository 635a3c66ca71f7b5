pub mod delimited;
pub mod workbook;

use crate::errors::SummaryError;

/// A header row plus data rows, every cell already rendered as text.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Where the table came from, e.g. "input/a.xlsx [All]"
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Resolve every required column by exact header name, or report all
    /// of the missing ones at once.
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>, SummaryError> {
        let mut found = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for name in names {
            match self.headers.iter().position(|h| h == name) {
                Some(idx) => found.push(idx),
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(found)
        } else {
            Err(SummaryError::MissingColumn {
                columns: missing,
                table: self.name.clone(),
            })
        }
    }

    /// Cell text, empty when the row is shorter than the header.
    pub fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
        row.get(idx).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(
            "t",
            vec!["message".into(), "type".into(), "severity".into()],
            vec![vec!["m".into(), "BUG".into()]],
        )
    }

    #[test]
    fn test_require_columns_in_requested_order() {
        assert_eq!(
            table().require_columns(&["severity", "message"]).unwrap(),
            vec![2, 0]
        );
    }

    #[test]
    fn test_require_columns_is_case_sensitive() {
        let err = table().require_columns(&["Severity", "message"]).unwrap_err();
        match err {
            SummaryError::MissingColumn { columns, table } => {
                assert_eq!(columns, vec!["Severity".to_string()]);
                assert_eq!(table, "t");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row_reads_empty() {
        let t = table();
        assert_eq!(Table::cell(&t.rows[0], 1), "BUG");
        assert_eq!(Table::cell(&t.rows[0], 2), "");
    }
}
