use serde::Deserialize;

// ── SonarQube web API responses ─────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalysesPage {
    #[serde(default)]
    pub analyses: Vec<Analysis>,
}

#[derive(Debug, Deserialize)]
pub struct Analysis {
    pub key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityGateResponse {
    pub project_status: ProjectStatus,
}

#[derive(Debug, Deserialize)]
pub struct ProjectStatus {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct MeasuresResponse {
    pub component: Component,
}

#[derive(Debug, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub measures: Vec<Measure>,
}

/// One `metric,value` pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Measure {
    pub metric: String,
    /// Absent for metrics that only carry period values
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct IssuesPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// One row of the issues CSV. Newer servers omit some fields (e.g.
/// `severity`); those come through empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Issue {
    pub key: String,
    pub severity: String,
    pub component: String,
    pub project: String,
    pub message: String,
    pub line: Option<u64>,
    pub status: String,
    pub creation_date: String,
    pub update_date: String,
}

/// Header of the issues CSV, in column order
pub const ISSUE_COLUMNS: [&str; 9] = [
    "key",
    "severity",
    "component",
    "project",
    "message",
    "line",
    "status",
    "creationDate",
    "updateDate",
];

impl Issue {
    pub fn record(&self) -> [String; 9] {
        [
            self.key.clone(),
            self.severity.clone(),
            self.component.clone(),
            self.project.clone(),
            self.message.clone(),
            self.line.map(|l| l.to_string()).unwrap_or_default(),
            self.status.clone(),
            self.creation_date.clone(),
            self.update_date.clone(),
        ]
    }
}
