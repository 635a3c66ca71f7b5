mod catalog;
mod classify;
mod cli;
mod config;
mod engine;
mod errors;
mod export;
mod report;
mod source;
mod taxonomy;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ExportArgs, RunArgs};
use engine::Summarizer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("sonar_summary=debug")
    } else if cli.quiet {
        EnvFilter::new("sonar_summary=error")
    } else {
        EnvFilter::new("sonar_summary=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    info!("sonar-summary v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        None => run(&RunArgs::default(), cli.quiet),
        Some(Commands::Run(ref args)) => run(args, cli.quiet),
        Some(Commands::Init) => config::init_config(),
        Some(Commands::ListCategories) => {
            catalog::list_categories();
            Ok(())
        }
        Some(Commands::Export(ref args)) => run_export(args),
    }
}

fn run(args: &RunArgs, quiet: bool) -> Result<()> {
    let summarizer = Summarizer::new(args)?;
    let run_report = summarizer.run()?;

    if !quiet {
        report::terminal::render(&run_report);
    }

    if let Some(ref path) = args.json {
        let output = report::json::render(&run_report)?;
        std::fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("JSON report written to {}", path.display());
    }

    Ok(())
}

fn run_export(args: &ExportArgs) -> Result<()> {
    let client = export::client::SonarClient::new(&args.url, &args.token)?;
    let opts = export::ExportOptions {
        project: args.project.clone(),
        issues_out: args.issues_out.clone(),
        metrics_out: args.metrics_out.clone(),
        page_size: args.page_size,
    };

    let result = export::export(&client, &opts)
        .with_context(|| format!("export of project '{}' failed", args.project))?;

    info!(
        "Exported {} issues and {} metrics from analysis {}",
        result.issues_written, result.metrics_written, result.analysis_id
    );
    Ok(())
}
