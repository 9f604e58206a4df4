//! Common display utilities for CLI commands.

use colored::Colorize;
use incgraph::LoadReport;

const MAX_WARNINGS_SHOWN: usize = 5;

/// Print non-fatal load findings, if there are any.
pub fn print_load_report(report: &LoadReport) {
    if report.duplicate_edges > 0 {
        println!(
            "  {}: dropped {} duplicate edges",
            "Note".yellow().bold(),
            report.duplicate_edges
        );
    }
    if report.undecodable_values > 0 {
        println!(
            "  {}: {} values did not match their declared type and were kept as text",
            "Note".yellow().bold(),
            report.undecodable_values
        );
    }

    for warning in report.warnings.iter().take(MAX_WARNINGS_SHOWN) {
        println!("  {}: {warning}", "Warning".yellow().bold());
    }
    if report.warnings.len() > MAX_WARNINGS_SHOWN {
        println!(
            "  {} ... and {} more warnings",
            "Warning".yellow().bold(),
            report.warnings.len() - MAX_WARNINGS_SHOWN
        );
    }
}

/// Print a titled list of `file: value` lines.
pub fn print_ranking(title: &str, rows: &[(&str, String)]) {
    println!("  {}:", title.white().bold());
    if rows.is_empty() {
        println!("    {}", "(none)".dimmed());
    }
    for (file, value) in rows {
        println!("    {} {file}: {value}", "•".dimmed());
    }
    println!();
}
