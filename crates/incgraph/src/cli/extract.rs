//! `incgraph extract-scc` command implementation.

use std::path::Path;

use colored::Colorize;
use incgraph::{extract_largest, load_graph, save_graph};

use super::display::print_load_report;

/// Run the extract-scc command.
pub fn run(input: &Path, output: &Path) -> Result<(), incgraph::Error> {
    let (graph, report) = load_graph(input)?;
    print_load_report(&report);

    let largest = extract_largest(&graph);
    save_graph(&largest, output)?;

    println!(
        "Wrote largest SCC ({} nodes, {} edges) to '{}'.",
        largest.node_count().to_string().green(),
        largest.edge_count().to_string().green(),
        output.display()
    );
    Ok(())
}
