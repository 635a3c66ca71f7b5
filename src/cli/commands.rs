use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize every export in the input directory (default)
    Run(RunArgs),

    /// Initialize a .sonar-summary.toml config file in the current directory
    Init,

    /// List the quality categories, keywords and severity scales
    ListCategories,

    /// Download the latest analysis of a project from a SonarQube server
    Export(ExportArgs),
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Directory holding the exports (defaults to the config value, then `input`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Also write a JSON run report to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Ignore .sonar-summary.toml config files
    #[arg(long)]
    pub no_config: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// SonarQube server base URL
    #[arg(long, env = "SONAR_HOST_URL")]
    pub url: String,

    /// Project key to export
    #[arg(short, long, env = "SONAR_PROJECT_KEY")]
    pub project: String,

    /// User token with browse permission on the project
    #[arg(long, env = "SONAR_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Where to write the issues CSV
    #[arg(long, default_value = "input/issues.csv")]
    pub issues_out: PathBuf,

    /// Where to write the metrics CSV
    #[arg(long, default_value = "metrics.csv")]
    pub metrics_out: PathBuf,

    /// Issues requested per page
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=500))]
    pub page_size: u32,
}
