//! `incgraph annotate` command implementation.

use std::path::Path;

use colored::Colorize;
use incgraph::{AnalysisConfig, apply_labels, classify, load_graph, save_graph};

use super::display::print_load_report;

/// Run the annotate command.
pub fn run(
    input: &Path,
    output: &Path,
    config: &AnalysisConfig,
    label_top: Option<usize>,
) -> Result<(), incgraph::Error> {
    let (mut graph, report) = load_graph(input)?;
    print_load_report(&report);

    let components = classify(&mut graph, &config.palette());
    let labels = apply_labels(&mut graph, label_top.unwrap_or(config.label_top_k));
    save_graph(&graph, output)?;

    println!(
        "  {}: {}",
        "Nodes".white().bold(),
        graph.node_count().to_string().green()
    );
    println!(
        "  {}: {}",
        "Edges".white().bold(),
        graph.edge_count().to_string().green()
    );
    let names: Vec<&str> = components.iter().map(String::as_str).collect();
    println!("  {}: {}", "Dependencies".white().bold(), names.join(", "));
    println!(
        "  {}: {} ({} top, {} per component)",
        "Labels".white().bold(),
        labels.shown(),
        labels.top,
        labels.forced
    );
    println!();
    println!(
        "{} {}",
        "Annotated graph written to".green(),
        output.display()
    );

    Ok(())
}
