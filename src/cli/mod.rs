pub mod commands;

use clap::Parser;

pub use commands::{Commands, ExportArgs, RunArgs};

/// sonar-summary — SonarQube export summarizer
///
/// Reads every .xlsx / .csv issue export in the input directory and writes
/// a per-category severity summary next to each one.
#[derive(Parser, Debug)]
#[command(
    name = "sonar-summary",
    version,
    about = "📊 sonar-summary — SonarQube export summarizer",
    long_about = "sonar-summary reads SonarQube issue exports (.xlsx or .csv) from the input directory,\nsorts every issue into a fixed set of quality categories and severities,\nand writes <name>-summary.<ext> next to each export.\n\nRun without arguments to process ./input."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}
