use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// File name looked up from the working directory upwards
pub const CONFIG_FILE: &str = ".sonar-summary.toml";

/// sonar-summary configuration (loaded from .sonar-summary.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub sheets: SheetsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory holding the exports
    #[serde(default = "default_input_dir")]
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Workbook sheet with the full issue list
    #[serde(default = "default_issues_sheet")]
    pub issues: String,

    /// Workbook sheet with security hotspots
    #[serde(default = "default_hotspots_sheet")]
    pub hotspots: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Inserted between the input's base name and its extension
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            dir: default_input_dir(),
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        SheetsConfig {
            issues: default_issues_sheet(),
            hotspots: default_hotspots_sheet(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            suffix: default_suffix(),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("input")
}

fn default_issues_sheet() -> String {
    "All".to_string()
}

fn default_hotspots_sheet() -> String {
    "Security Hotspots".to_string()
}

fn default_suffix() -> String {
    "-summary".to_string()
}

impl SummaryConfig {
    /// Try to load .sonar-summary.toml from the given directory or its parents
    pub fn load(start: &Path) -> Option<Self> {
        let config_path = find_config_file(start)?;
        debug!("Found config: {}", config_path.display());

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str::<SummaryConfig>(&content) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Could not read {}: {}", config_path.display(), e);
                None
            }
        }
    }
}

/// Walk up from `start` to find .sonar-summary.toml
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let config = current.join(CONFIG_FILE);
        if config.exists() {
            return Some(config);
        }
        if !current.pop() {
            return None;
        }
    }
}

const DEFAULT_CONFIG: &str = r#"# sonar-summary configuration

[input]
# Directory holding the SonarQube exports (.xlsx / .csv)
dir = "input"

[sheets]
# Workbook sheet with every issue (columns: message, type, severity)
issues = "All"

# Workbook sheet with security hotspots (column: Severity)
hotspots = "Security Hotspots"

[output]
# report.xlsx -> report-summary.xlsx
suffix = "-summary"
"#;

/// Create a default .sonar-summary.toml in the current directory
pub fn init_config() -> Result<()> {
    let config_path = std::env::current_dir()?.join(CONFIG_FILE);

    if config_path.exists() {
        println!("⚠️  {} already exists in this directory", CONFIG_FILE);
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("✅ Created {}", CONFIG_FILE);
    println!("   Edit it to point at your exports.");

    Ok(())
}
