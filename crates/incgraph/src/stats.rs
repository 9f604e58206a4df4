//! The statistics report: every analysis run once over a loaded graph.

use serde::Serialize;
use tracing::info;

use crate::analysis::{
    CycleCount, CycleLimits, DegreeAnalyzer, average_clustering, count_simple_cycles,
    strongly_connected_components,
};
use crate::config::{AnalysisConfig, DEFAULT_TOP_K};
use crate::graph::Graph;
use crate::types::Ranked;

/// A ranked node reported by its file path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFile<T> {
    /// The node's `file` attribute, or its id when it has none.
    pub file: String,
    /// Its score.
    pub value: T,
}

/// Structural statistics of one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of distinct edges.
    pub edge_count: usize,
    /// Largest in-degree (most included).
    pub max_in_degree: usize,
    /// Largest out-degree (most including).
    pub max_out_degree: usize,
    /// Most included files.
    pub top_in_degree: Vec<RankedFile<usize>>,
    /// Files including the most others.
    pub top_out_degree: Vec<RankedFile<usize>>,
    /// Files with the highest degree centrality.
    pub top_centrality: Vec<RankedFile<f64>>,
    /// Number of strongly connected components.
    pub scc_count: usize,
    /// Components containing at least one cycle.
    pub cyclic_scc_count: usize,
    /// Size of the largest strongly connected component.
    pub largest_scc_size: usize,
    /// Files of the largest strongly connected component, in node order.
    pub largest_scc_files: Vec<String>,
    /// Simple cycle count and whether the guard stopped it.
    pub cycles: CycleCount,
    /// Mean directed clustering coefficient.
    pub average_clustering: f64,
}

/// Knobs for [`compute_statistics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsOptions {
    /// Length of each ranking.
    pub top_k: usize,
    /// Guard for cycle counting.
    pub cycle_limits: CycleLimits,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            cycle_limits: CycleLimits::default(),
        }
    }
}

impl From<&AnalysisConfig> for StatsOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            top_k: config.top_k,
            cycle_limits: config.cycle_limits(),
        }
    }
}

/// Run every analysis over `graph`.
///
/// An empty graph is not an error: every count is 0 and every list empty.
#[must_use]
pub fn compute_statistics(graph: &Graph, options: &StatsOptions) -> GraphStats {
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Computing degree metrics"
    );
    let degrees = DegreeAnalyzer::new(graph);
    let top_in_degree = ranked_files(graph, degrees.top_by_in_degree(options.top_k));
    let top_out_degree = ranked_files(graph, degrees.top_by_out_degree(options.top_k));

    info!("Computing degree centrality");
    let top_centrality = ranked_files(graph, degrees.top_by_centrality(options.top_k));

    info!("Finding strongly connected components");
    let scc = strongly_connected_components(graph);
    let largest = scc.largest_component();
    let largest_scc_files = largest
        .iter()
        .map(|&n| graph.display_name(n).to_string())
        .collect();

    info!("Counting simple cycles");
    let cycles = count_simple_cycles(graph, &options.cycle_limits);

    info!("Computing average clustering coefficient");
    let average_clustering = average_clustering(graph);

    GraphStats {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        max_in_degree: degrees.max_in_degree(),
        max_out_degree: degrees.max_out_degree(),
        top_in_degree,
        top_out_degree,
        top_centrality,
        scc_count: scc.len(),
        cyclic_scc_count: scc.cyclic_count(graph),
        largest_scc_size: largest.len(),
        largest_scc_files,
        cycles,
        average_clustering,
    }
}

fn ranked_files<T>(graph: &Graph, ranked: Vec<Ranked<T>>) -> Vec<RankedFile<T>> {
    ranked
        .into_iter()
        .map(|r| RankedFile {
            file: graph.display_name(r.node).to_string(),
            value: r.value,
        })
        .collect()
}
