//! Pull the latest analysis of a project from a SonarQube server and save
//! it as the CSV files the summary run reads.
//!
//! Steps, in order:
//! 1. latest analysis id (`api/project_analyses/search`)
//! 2. quality gate status of that analysis (`api/qualitygates/project_status`)
//! 3. letter-grade ratings (`api/measures/component`)
//! 4. every issue, page by page (`api/issues/search`) into the issues CSV
//! 5. headline metrics (`api/measures/component`) into the metrics CSV

pub mod client;
pub mod model;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::ExportError;
use model::{AnalysesPage, Issue, IssuesPage, Measure, MeasuresResponse, QualityGateResponse, ISSUE_COLUMNS};

/// Ratings logged after the quality gate
pub const RATING_METRICS: &str = "reliability_rating,security_rating,sqale_rating";

/// Metrics written to the metrics CSV
pub const EXPORT_METRICS: &str =
    "bugs,vulnerabilities,security_hotspots_reviewed,code_smells,coverage,duplicated_lines_density,ncloc";

/// Read-only access to the SonarQube web API.
pub trait SonarApi {
    /// GET `endpoint` (e.g. "api/issues/search") with query parameters and
    /// return the decoded JSON body
    fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, ExportError>;
}

/// What to export and where to put it
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub project: String,
    pub issues_out: PathBuf,
    pub metrics_out: PathBuf,
    pub page_size: u32,
}

/// Result of one export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub analysis_id: String,
    pub quality_gate: String,
    pub ratings: Vec<Measure>,
    /// Issue count the server reported
    pub issues_total: u64,
    /// Issue rows actually written
    pub issues_written: usize,
    pub metrics_written: usize,
}

/// Run the full export against `api`
pub fn export(api: &dyn SonarApi, opts: &ExportOptions) -> Result<ExportReport, ExportError> {
    let analysis_id = latest_analysis(api, &opts.project)?;
    info!("Analysis ID: {}", analysis_id);

    let quality_gate = quality_gate_status(api, &analysis_id)?;
    info!("Quality gate: {}", quality_gate);

    let ratings = measures(api, &opts.project, RATING_METRICS)?;
    for m in &ratings {
        info!("{} = {}", m.metric, m.value);
    }

    let (issues, issues_total) = fetch_issues(api, &opts.project, opts.page_size)?;
    write_issues(&opts.issues_out, &issues)?;
    info!(
        "Total issues fetched: {} (saved {} to {})",
        issues_total,
        issues.len(),
        opts.issues_out.display()
    );

    let metrics = measures(api, &opts.project, EXPORT_METRICS)?;
    write_metrics(&opts.metrics_out, &metrics)?;
    info!("Metrics saved to {}", opts.metrics_out.display());

    Ok(ExportReport {
        analysis_id,
        quality_gate,
        ratings,
        issues_total,
        issues_written: issues.len(),
        metrics_written: metrics.len(),
    })
}

fn get_as<T: DeserializeOwned>(
    api: &dyn SonarApi,
    endpoint: &str,
    query: &[(&str, String)],
) -> Result<T, ExportError> {
    let body = api.get(endpoint, query)?;
    serde_json::from_value(body).map_err(|source| ExportError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Key of the most recent analysis of `project`
pub fn latest_analysis(api: &dyn SonarApi, project: &str) -> Result<String, ExportError> {
    let page: AnalysesPage = get_as(
        api,
        "api/project_analyses/search",
        &[("project", project.to_string()), ("ps", "1".to_string())],
    )?;

    page.analyses
        .into_iter()
        .next()
        .map(|a| a.key)
        .ok_or_else(|| ExportError::NoAnalysis {
            project: project.to_string(),
        })
}

pub fn quality_gate_status(api: &dyn SonarApi, analysis_id: &str) -> Result<String, ExportError> {
    let gate: QualityGateResponse = get_as(
        api,
        "api/qualitygates/project_status",
        &[("analysisId", analysis_id.to_string())],
    )?;
    Ok(gate.project_status.status)
}

pub fn measures(api: &dyn SonarApi, project: &str, metric_keys: &str) -> Result<Vec<Measure>, ExportError> {
    let resp: MeasuresResponse = get_as(
        api,
        "api/measures/component",
        &[
            ("component", project.to_string()),
            ("metricKeys", metric_keys.to_string()),
        ],
    )?;
    Ok(resp.component.measures)
}

/// Every issue of `project`, plus the total the server reported.
///
/// Stops on an empty or short page, or once the reported total is reached.
pub fn fetch_issues(
    api: &dyn SonarApi,
    project: &str,
    page_size: u32,
) -> Result<(Vec<Issue>, u64), ExportError> {
    let page_size = page_size.max(1);
    let mut page = 1u32;
    let mut total = 0u64;
    let mut issues = Vec::new();

    loop {
        let resp: IssuesPage = get_as(
            api,
            "api/issues/search",
            &[
                ("componentKeys", project.to_string()),
                ("p", page.to_string()),
                ("ps", page_size.to_string()),
            ],
        )?;

        if page == 1 {
            total = resp.total;
        }

        let fetched = resp.issues.len();
        debug!("Issues page {}: {} issues", page, fetched);
        if fetched == 0 {
            break;
        }
        issues.extend(resp.issues);

        if fetched < page_size as usize || issues.len() as u64 >= total {
            break;
        }
        page += 1;
    }

    Ok((issues, total))
}

fn csv_writer(path: &Path) -> Result<csv::Writer<std::fs::File>, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    csv::Writer::from_path(path).map_err(|source| ExportError::Csv {
        file: path.to_path_buf(),
        source,
    })
}

pub fn write_issues(path: &Path, issues: &[Issue]) -> Result<(), ExportError> {
    let wrap = |source: csv::Error| ExportError::Csv {
        file: path.to_path_buf(),
        source,
    };

    let mut writer = csv_writer(path)?;
    writer.write_record(ISSUE_COLUMNS).map_err(wrap)?;
    for issue in issues {
        writer.write_record(issue.record()).map_err(wrap)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_metrics(path: &Path, metrics: &[Measure]) -> Result<(), ExportError> {
    let wrap = |source: csv::Error| ExportError::Csv {
        file: path.to_path_buf(),
        source,
    };

    let mut writer = csv_writer(path)?;
    writer.write_record(["metric", "value"]).map_err(wrap)?;
    for m in metrics {
        writer
            .write_record([m.metric.as_str(), m.value.as_str()])
            .map_err(wrap)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SummaryConfig;
    use crate::engine::Summarizer;
    use crate::taxonomy::Category;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Canned responses keyed by "endpoint?k=v&k=v"
    #[derive(Default)]
    struct FakeSonar {
        responses: HashMap<String, Value>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeSonar {
        fn on(mut self, endpoint: &str, query: &[(&str, &str)], body: Value) -> Self {
            let query: Vec<(&str, String)> = query.iter().map(|(k, v)| (*k, v.to_string())).collect();
            self.responses.insert(request_key(endpoint, &query), body);
            self
        }
    }

    fn request_key(endpoint: &str, query: &[(&str, String)]) -> String {
        let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{}?{}", endpoint, pairs.join("&"))
    }

    impl SonarApi for FakeSonar {
        fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, ExportError> {
            let key = request_key(endpoint, query);
            self.calls.borrow_mut().push(key.clone());
            self.responses
                .get(&key)
                .cloned()
                .ok_or(ExportError::Status { url: key, status: 404 })
        }
    }

    fn issue(n: usize, message: &str, severity: &str) -> Value {
        json!({
            "key": format!("AX{n}"),
            "severity": severity,
            "component": "app:src/lib.rs",
            "project": "app",
            "message": message,
            "line": n,
            "status": "OPEN",
            "creationDate": "2024-03-01T10:00:00+0000",
            "updateDate": "2024-03-01T10:00:00+0000"
        })
    }

    fn server(pages: Vec<Value>) -> FakeSonar {
        let mut fake = FakeSonar::default()
            .on(
                "api/project_analyses/search",
                &[("project", "app"), ("ps", "1")],
                json!({"analyses": [{"key": "AN-2"}, {"key": "AN-1"}]}),
            )
            .on(
                "api/qualitygates/project_status",
                &[("analysisId", "AN-2")],
                json!({"projectStatus": {"status": "ERROR", "conditions": []}}),
            )
            .on(
                "api/measures/component",
                &[("component", "app"), ("metricKeys", RATING_METRICS)],
                json!({"component": {"key": "app", "measures": [
                    {"metric": "security_rating", "value": "1.0"}
                ]}}),
            )
            .on(
                "api/measures/component",
                &[("component", "app"), ("metricKeys", EXPORT_METRICS)],
                json!({"component": {"key": "app", "measures": [
                    {"metric": "bugs", "value": "4"},
                    {"metric": "coverage", "value": "71.3"},
                    {"metric": "new_bugs", "periods": [{"index": 1, "value": "0"}]}
                ]}}),
            );
        for (i, body) in pages.into_iter().enumerate() {
            let p = (i + 1).to_string();
            fake = fake.on(
                "api/issues/search",
                &[("componentKeys", "app"), ("p", p.as_str()), ("ps", "2")],
                body,
            );
        }
        fake
    }

    fn options(dir: &Path) -> ExportOptions {
        ExportOptions {
            project: "app".to_string(),
            issues_out: dir.join("input").join("issues.csv"),
            metrics_out: dir.join("metrics.csv"),
            page_size: 2,
        }
    }

    #[test]
    fn test_pages_until_short_page() {
        let api = server(vec![
            json!({"total": 3, "issues": [issue(1, "a", "MAJOR"), issue(2, "b", "MINOR")]}),
            json!({"total": 3, "issues": [issue(3, "c", "INFO")]}),
        ]);

        let (issues, total) = fetch_issues(&api, "app", 2).unwrap();

        assert_eq!(total, 3);
        let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["AX1", "AX2", "AX3"]);
        assert_eq!(api.calls.borrow().len(), 2);
    }

    #[test]
    fn test_stops_on_empty_page() {
        let api = server(vec![
            json!({"total": 5, "issues": [issue(1, "a", "MAJOR"), issue(2, "b", "MINOR")]}),
            json!({"total": 5, "issues": []}),
        ]);

        let (issues, _) = fetch_issues(&api, "app", 2).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(api.calls.borrow().len(), 2);
    }

    #[test]
    fn test_no_analysis_is_an_error() {
        let api = FakeSonar::default().on(
            "api/project_analyses/search",
            &[("project", "app"), ("ps", "1")],
            json!({"analyses": []}),
        );

        let err = latest_analysis(&api, "app").unwrap_err();
        assert!(matches!(err, ExportError::NoAnalysis { .. }));
    }

    #[test]
    fn test_unexpected_body_is_a_decode_error() {
        let api = FakeSonar::default().on(
            "api/qualitygates/project_status",
            &[("analysisId", "AN-2")],
            json!({"errors": [{"msg": "nope"}]}),
        );

        let err = quality_gate_status(&api, "AN-2").unwrap_err();
        assert!(matches!(err, ExportError::Decode { .. }));
    }

    #[test]
    fn test_export_writes_both_csvs() {
        let dir = tempfile::tempdir().unwrap();
        let api = server(vec![
            json!({"total": 3, "issues": [
                issue(1, "Found 2 duplicate blocks, of code", "MAJOR"),
                issue(2, "Refactor: Cognitive Complexity 20", "CRITICAL")
            ]}),
            json!({"total": 3, "issues": [issue(3, "Rename \"x\"", "INFO")]}),
        ]);
        let opts = options(dir.path());

        let report = export(&api, &opts).unwrap();

        assert_eq!(report.analysis_id, "AN-2");
        assert_eq!(report.quality_gate, "ERROR");
        assert_eq!(report.ratings.len(), 1);
        assert_eq!(report.issues_total, 3);
        assert_eq!(report.issues_written, 3);
        assert_eq!(report.metrics_written, 3);

        let issues = std::fs::read_to_string(&opts.issues_out).unwrap();
        let mut lines = issues.lines();
        assert_eq!(
            lines.next().unwrap(),
            "key,severity,component,project,message,line,status,creationDate,updateDate"
        );
        assert_eq!(
            lines.next().unwrap(),
            "AX1,MAJOR,app:src/lib.rs,app,\"Found 2 duplicate blocks, of code\",1,OPEN,2024-03-01T10:00:00+0000,2024-03-01T10:00:00+0000"
        );

        let metrics = std::fs::read_to_string(&opts.metrics_out).unwrap();
        assert_eq!(metrics, "metric,value\nbugs,4\ncoverage,71.3\nnew_bugs,\n");
    }

    #[test]
    fn test_exported_issues_feed_the_summary() {
        let dir = tempfile::tempdir().unwrap();
        let api = server(vec![json!({"total": 2, "issues": [
            issue(1, "Found 2 duplicate blocks", "BLOCKER"),
            issue(2, "Remove this unused import", "MINOR")
        ]})]);
        let opts = options(dir.path());
        export(&api, &opts).unwrap();

        let engine = Summarizer::with_config(dir.path().join("input"), &SummaryConfig::default());
        let report = engine.process_file(&opts.issues_out).unwrap();

        assert!(report.anomalies.is_empty());
        assert_eq!(report.summary.rows.len(), 2);
        assert_eq!(report.summary.rows[0].category, Category::CodeDuplication);
        assert_eq!(report.summary.rows[0].severity, "High");
        assert_eq!(report.summary.rows[1].category, Category::Other);
        assert_eq!(report.summary.rows[1].severity, "MINOR");
    }
}
