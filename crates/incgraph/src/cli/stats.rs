//! `incgraph stats` command implementation.

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use incgraph::{AnalysisConfig, GraphStats, StatsOptions, compute_statistics, load_graph};

use super::display::{print_load_report, print_ranking};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    /// `--top`
    pub top: Option<usize>,
    /// `--max-cycles`
    pub max_cycles: Option<u64>,
    /// `--cycle-timeout`, in seconds
    pub cycle_timeout: Option<u64>,
}

impl Overrides {
    fn apply(self, mut options: StatsOptions) -> StatsOptions {
        if let Some(top) = self.top {
            options.top_k = top;
        }
        // 0 turns a limit off
        if let Some(max) = self.max_cycles {
            options.cycle_limits.max_cycles = (max > 0).then_some(max);
        }
        if let Some(secs) = self.cycle_timeout {
            options.cycle_limits.time_budget = (secs > 0).then(|| Duration::from_secs(secs));
        }
        options
    }
}

/// Run the stats command.
pub fn run(
    input: &Path,
    config: &AnalysisConfig,
    overrides: Overrides,
    json: bool,
) -> Result<(), incgraph::Error> {
    let (graph, report) = load_graph(input)?;
    let options = overrides.apply(StatsOptions::from(config));
    let stats = compute_statistics(&graph, &options);

    if json {
        let rendered = serde_json::to_string_pretty(&stats)
            .map_err(|e| incgraph::Error::Io(e.into()))?;
        println!("{rendered}");
        return Ok(());
    }

    print_load_report(&report);
    print_stats(&stats, options.top_k);
    Ok(())
}

fn print_stats(stats: &GraphStats, top_k: usize) {
    println!("{}", "Graph Statistics".cyan().bold());
    println!();

    let field = |name: &str, value: String| {
        println!("  {}: {}", name.white().bold(), value.green());
    };
    field("Nodes", stats.node_count.to_string());
    field("Edges", stats.edge_count.to_string());
    field("Maximum in-degree (most included)", stats.max_in_degree.to_string());
    field(
        "Maximum out-degree (most including)",
        stats.max_out_degree.to_string(),
    );
    println!();

    print_ranking(
        &format!("Top {top_k} most included files (in-degree)"),
        &stats
            .top_in_degree
            .iter()
            .map(|r| (r.file.as_str(), r.value.to_string()))
            .collect::<Vec<_>>(),
    );
    print_ranking(
        &format!("Top {top_k} most including files (out-degree)"),
        &stats
            .top_out_degree
            .iter()
            .map(|r| (r.file.as_str(), r.value.to_string()))
            .collect::<Vec<_>>(),
    );
    print_ranking(
        &format!("Top {top_k} files by degree centrality"),
        &stats
            .top_centrality
            .iter()
            .map(|r| (r.file.as_str(), format!("{:.4}", r.value)))
            .collect::<Vec<_>>(),
    );

    field(
        "Strongly connected components",
        format!("{} ({} cyclic)", stats.scc_count, stats.cyclic_scc_count),
    );
    field("Largest component size", stats.largest_scc_size.to_string());
    println!("  {}:", "Largest component files".white().bold());
    if stats.largest_scc_files.is_empty() {
        println!("    {}", "(none)".dimmed());
    }
    for file in &stats.largest_scc_files {
        println!("    {} {file}", "•".dimmed());
    }
    println!();

    match stats.cycles.aborted {
        None => field("Simple cycles", stats.cycles.count.to_string()),
        Some(reason) => println!(
            "  {}: at least {} ({})",
            "Simple cycles".white().bold(),
            stats.cycles.count.to_string().yellow(),
            reason.to_string().yellow()
        ),
    }
    field(
        "Average clustering coefficient",
        format!("{:.4}", stats.average_clustering),
    );
}
