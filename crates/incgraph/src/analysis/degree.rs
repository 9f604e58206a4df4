//! Degree maps, degree centrality and top-k rankings.
//!
//! ## Tie-breaking
//!
//! Rankings sort by value, highest first, with a stable sort over nodes in
//! insertion order. Among equal values the node added first wins, so results
//! are identical across runs on the same input.

use std::cmp::Ordering;

use crate::graph::Graph;
use crate::types::{NodeMap, Ranked};

/// Degree and centrality queries over one graph.
///
/// Degree maps are computed once at construction.
#[derive(Debug, Clone)]
pub struct DegreeAnalyzer<'g> {
    graph: &'g Graph,
    in_degree: NodeMap<usize>,
    out_degree: NodeMap<usize>,
}

impl<'g> DegreeAnalyzer<'g> {
    /// Compute in- and out-degree for every node.
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        let in_degree = NodeMap::from_vec(graph.nodes().map(|n| graph.in_degree(n)).collect());
        let out_degree = NodeMap::from_vec(graph.nodes().map(|n| graph.out_degree(n)).collect());
        Self {
            graph,
            in_degree,
            out_degree,
        }
    }

    /// In-degree of every node (0 for nodes nothing points to).
    #[must_use]
    pub fn in_degree_map(&self) -> &NodeMap<usize> {
        &self.in_degree
    }

    /// Out-degree of every node (0 for nodes pointing nowhere).
    #[must_use]
    pub fn out_degree_map(&self) -> &NodeMap<usize> {
        &self.out_degree
    }

    /// Largest in-degree, 0 for an empty graph.
    #[must_use]
    pub fn max_in_degree(&self) -> usize {
        self.in_degree.values().copied().max().unwrap_or(0)
    }

    /// Largest out-degree, 0 for an empty graph.
    #[must_use]
    pub fn max_out_degree(&self) -> usize {
        self.out_degree.values().copied().max().unwrap_or(0)
    }

    /// The `k` most included nodes.
    #[must_use]
    pub fn top_by_in_degree(&self, k: usize) -> Vec<Ranked<usize>> {
        top_k(&self.in_degree, k)
    }

    /// The `k` nodes including the most others.
    #[must_use]
    pub fn top_by_out_degree(&self, k: usize) -> Vec<Ranked<usize>> {
        top_k(&self.out_degree, k)
    }

    /// Degree centrality: `(in + out) / (N - 1)`.
    ///
    /// Every node gets 0 when the graph has at most one node. The value can
    /// exceed 1 in graphs with reciprocal edges, since in- and out-degree
    /// are each bounded by `N - 1` (plus one for a self-loop).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn degree_centrality(&self) -> NodeMap<f64> {
        let n = self.graph.node_count();
        if n <= 1 {
            return NodeMap::from_vec(vec![0.0; n]);
        }
        let scale = 1.0 / (n - 1) as f64;
        NodeMap::from_vec(
            self.in_degree
                .values()
                .zip(self.out_degree.values())
                .map(|(i, o)| (i + o) as f64 * scale)
                .collect(),
        )
    }

    /// The `k` nodes with the highest degree centrality.
    #[must_use]
    pub fn top_by_centrality(&self, k: usize) -> Vec<Ranked<f64>> {
        top_k(&self.degree_centrality(), k)
    }
}

/// Rank values highest first, ties in index order, keeping at most `k`.
pub(crate) fn top_k<T: PartialOrd + Copy>(values: &NodeMap<T>, k: usize) -> Vec<Ranked<T>> {
    let mut ranked: Vec<Ranked<T>> = values
        .iter()
        .map(|(node, &value)| Ranked { node, value })
        .collect();
    ranked.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NodeIndex, file_attrs};

    /// a -> b, a -> c, b -> c, d isolated
    fn sample() -> Graph {
        let mut graph = Graph::new();
        for id in ["a", "b", "c", "d"] {
            graph.add_node(id, file_attrs(id)).unwrap();
        }
        graph.add_edge("a", "b").unwrap();
        graph.add_edge("a", "c").unwrap();
        graph.add_edge("b", "c").unwrap();
        graph
    }

    #[test]
    fn degree_maps_cover_isolated_nodes() {
        let graph = sample();
        let degrees = DegreeAnalyzer::new(&graph);

        assert_eq!(degrees.in_degree_map().len(), 4);
        assert_eq!(degrees.in_degree_map()[NodeIndex(2)], 2);
        assert_eq!(degrees.in_degree_map()[NodeIndex(3)], 0);
        assert_eq!(degrees.out_degree_map()[NodeIndex(0)], 2);
        assert_eq!(degrees.max_in_degree(), 2);
        assert_eq!(degrees.max_out_degree(), 2);
    }

    #[test]
    fn centrality_normalizes_by_n_minus_one() {
        let graph = sample();
        let centrality = DegreeAnalyzer::new(&graph).degree_centrality();

        assert!((centrality[NodeIndex(0)] - 2.0 / 3.0).abs() < 1e-12);
        assert!((centrality[NodeIndex(2)] - 2.0 / 3.0).abs() < 1e-12);
        assert!(centrality[NodeIndex(3)].abs() < f64::EPSILON);
    }

    #[test]
    fn centrality_is_zero_for_single_node() {
        let mut graph = Graph::new();
        graph.add_node("solo", file_attrs("solo")).unwrap();
        graph.add_edge("solo", "solo").unwrap();

        let centrality = DegreeAnalyzer::new(&graph).degree_centrality();
        assert_eq!(centrality.into_vec(), vec![0.0]);
    }

    #[test]
    fn ties_rank_in_insertion_order() {
        let graph = sample();
        let degrees = DegreeAnalyzer::new(&graph);

        // a, b and c all have total degree 2
        let top = degrees.top_by_centrality(2);
        assert_eq!(top[0].node, NodeIndex(0));
        assert_eq!(top[1].node, NodeIndex(1));
    }

    #[test]
    fn top_k_truncates_and_handles_large_k() {
        let graph = sample();
        let degrees = DegreeAnalyzer::new(&graph);

        let top = degrees.top_by_in_degree(1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].node, NodeIndex(2));
        assert_eq!(top[0].value, 2);

        assert_eq!(degrees.top_by_out_degree(100).len(), 4);
    }

    #[test]
    fn empty_graph_yields_empty_results() {
        let graph = Graph::new();
        let degrees = DegreeAnalyzer::new(&graph);
        assert!(degrees.in_degree_map().is_empty());
        assert_eq!(degrees.max_in_degree(), 0);
        assert!(degrees.top_by_centrality(10).is_empty());
    }
}
