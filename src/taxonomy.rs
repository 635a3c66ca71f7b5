//! The fixed quality taxonomy: categories, their message keywords, and the
//! per-category severity scales used to normalize raw SonarQube severities.

use std::cmp::Ordering;

use serde::Serialize;

/// Quality dimension an issue is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Cyclomatic Complexity")]
    CyclomaticComplexity,
    #[serde(rename = "Code Documentation")]
    CodeDocumentation,
    #[serde(rename = "Code Duplication")]
    CodeDuplication,
    #[serde(rename = "Code Churn")]
    CodeChurn,
    #[serde(rename = "Code Coverage")]
    CodeCoverage,
    #[serde(rename = "Code Security")]
    CodeSecurity,
    #[serde(rename = "Code Bug Issues")]
    CodeBugIssues,
    Other,
}

/// Categories checked against the issue message, in tie-break order.
pub const KEYWORD_SCAN: [Category; 6] = [
    Category::CyclomaticComplexity,
    Category::CodeDocumentation,
    Category::CodeDuplication,
    Category::CodeChurn,
    Category::CodeCoverage,
    Category::CodeSecurity,
];

/// Every category, in declaration order.
pub const ALL_CATEGORIES: [Category; 8] = [
    Category::CyclomaticComplexity,
    Category::CodeDocumentation,
    Category::CodeDuplication,
    Category::CodeChurn,
    Category::CodeCoverage,
    Category::CodeSecurity,
    Category::CodeBugIssues,
    Category::Other,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CyclomaticComplexity => "Cyclomatic Complexity",
            Category::CodeDocumentation => "Code Documentation",
            Category::CodeDuplication => "Code Duplication",
            Category::CodeChurn => "Code Churn",
            Category::CodeCoverage => "Code Coverage",
            Category::CodeSecurity => "Code Security",
            Category::CodeBugIssues => "Code Bug Issues",
            Category::Other => "Other",
        }
    }

    /// Lowercase substrings that put a message into this category.
    /// An empty list never matches.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::CyclomaticComplexity => &["cognitive", "cyclomatic"],
            Category::CodeDuplication => &["duplicate", "duplicates"],
            _ => &[],
        }
    }

    /// Severity scale for this category, if raw severities get remapped.
    pub fn scale(&self) -> Option<&'static SeverityScale> {
        match self {
            Category::CyclomaticComplexity => Some(&COMPLEXITY_SCALE),
            Category::CodeSecurity => Some(&SECURITY_SCALE),
            Category::CodeDuplication | Category::CodeBugIssues => Some(&RISK_SCALE),
            _ => None,
        }
    }

    /// Normalized label for a raw severity. Unmapped categories pass the
    /// raw value through unchanged.
    pub fn severity_label(&self, raw: &str) -> String {
        match self.scale() {
            Some(scale) => scale.map(raw).to_string(),
            None => raw.to_string(),
        }
    }

    /// Output ordering of two severity labels within this category.
    pub fn compare_labels(&self, a: &str, b: &str) -> Ordering {
        match self.scale() {
            Some(scale) => match (scale.rank(a), scale.rank(b)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.cmp(b),
            },
            None => a.cmp(b),
        }
    }

    fn matches(&self, lowered_message: &str) -> bool {
        self.keywords().iter().any(|k| lowered_message.contains(k))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Three-tier mapping from raw SonarQube severity to a category label.
#[derive(Debug)]
pub struct SeverityScale {
    /// Label for CRITICAL and BLOCKER
    pub severe: &'static str,
    /// Label for MAJOR
    pub major: &'static str,
    /// Label for anything else
    pub fallback: &'static str,
}

impl SeverityScale {
    pub fn map(&self, raw: &str) -> &'static str {
        match raw {
            "CRITICAL" | "BLOCKER" => self.severe,
            "MAJOR" => self.major,
            _ => self.fallback,
        }
    }

    /// Labels from most to least severe.
    pub fn order(&self) -> [&'static str; 3] {
        [self.severe, self.major, self.fallback]
    }

    fn rank(&self, label: &str) -> Option<usize> {
        self.order().iter().position(|l| *l == label)
    }
}

pub static COMPLEXITY_SCALE: SeverityScale = SeverityScale {
    severe: "High Risk",
    major: "Complex",
    fallback: "Moderate",
};

pub static SECURITY_SCALE: SeverityScale = SeverityScale {
    severe: "Unacceptable",
    major: "Manage",
    fallback: "Acceptable",
};

pub static RISK_SCALE: SeverityScale = SeverityScale {
    severe: "High",
    major: "Medium",
    fallback: "Low",
};

/// First category (in [`KEYWORD_SCAN`] order) whose keywords occur in the
/// message, compared case-insensitively.
pub fn match_message(message: &str) -> Option<Category> {
    let lowered = message.to_lowercase();
    KEYWORD_SCAN.into_iter().find(|c| c.matches(&lowered))
}

/// Resolve a non-bug issue to its bucket. Messages matching no keyword
/// land in `Other` with the raw severity.
pub fn classify_message(message: &str, raw_severity: &str) -> (Category, String) {
    match match_message(message) {
        Some(category) => (category, category.severity_label(raw_severity)),
        None => (Category::Other, raw_severity.to_string()),
    }
}

/// Bucket for an issue tagged as a bug.
pub fn classify_bug(raw_severity: &str) -> (Category, String) {
    let category = Category::CodeBugIssues;
    (category, category.severity_label(raw_severity))
}

/// Bucket for a security hotspot.
pub fn classify_hotspot(raw_severity: &str) -> (Category, String) {
    let category = Category::CodeSecurity;
    (category, category.severity_label(raw_severity))
}
