use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement};
use owo_colors::OwoColorize;

use crate::report::summary::{Summary, HEADER};
use crate::report::RunReport;

/// Print every file's summary as a table, followed by a one-line total.
pub fn render(report: &RunReport) {
    println!();
    println!(
        "{}  sonar-summary v{} — {} export(s) in {}",
        "📊".bold(),
        report.version,
        report.files.len(),
        report.input_dir.display()
    );
    println!();

    if report.files.is_empty() {
        println!("  {}", "No .xlsx or .csv exports found.".dimmed());
        println!();
        return;
    }

    for file in &report.files {
        match &file.output {
            Some(output) => println!(
                "  {} {}",
                file.input.display().bold(),
                format!("→ {}", output.display()).green()
            ),
            None => println!(
                "  {} {}",
                file.input.display().bold(),
                "(skipped)".yellow()
            ),
        }

        for anomaly in &file.anomalies {
            println!("    {} {}", "▲".yellow(), anomaly.dimmed());
        }

        if file.output.is_some() {
            if file.summary.is_empty() {
                println!("    {}", "no issues classified".dimmed());
            } else {
                println!("{}", summary_table(&file.summary));
            }
        }
        println!();
    }

    println!("{}", "━".repeat(60));
    let total: u64 = report.files.iter().map(|f| f.total).sum();
    println!(
        " {} issues summarized into {} file(s)",
        total.to_string().bold(),
        report.files_written().to_string().bold()
    );
    println!("{}", "━".repeat(60));
    println!();
}

fn summary_table(summary: &Summary) -> comfy_table::Table {
    let mut table = comfy_table::Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(HEADER.to_vec());

    for row in &summary.rows {
        table.add_row(vec![
            Cell::new(row.category.as_str()),
            Cell::new(&row.severity),
            Cell::new(row.count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
