//! Directed local clustering coefficient.
//!
//! A node's neighborhood is every node it points to or is pointed to by,
//! deduplicated and excluding the node itself. The coefficient is the number
//! of directed edges among the neighborhood divided by `k * (k - 1)`, the
//! most a set of `k` nodes can hold without self-loops.

use crate::graph::Graph;
use crate::types::{NodeIndex, NodeMap};

/// Clustering coefficient of every node.
#[must_use]
pub fn clustering(graph: &Graph) -> NodeMap<f64> {
    // mark[u] == stamp means u is a neighbor of the node being scored
    let mut mark = vec![usize::MAX; graph.node_count()];
    let mut neighbors = Vec::new();
    NodeMap::from_vec(
        graph
            .nodes()
            .map(|node| score(graph, node, &mut mark, &mut neighbors))
            .collect(),
    )
}

/// Clustering coefficient of a single node.
#[must_use]
pub fn local_clustering(graph: &Graph, node: NodeIndex) -> f64 {
    let mut mark = vec![usize::MAX; graph.node_count()];
    score(graph, node, &mut mark, &mut Vec::new())
}

/// Unweighted mean of [`clustering`] over all nodes, 0 for an empty graph.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_clustering(graph: &Graph) -> f64 {
    if graph.is_empty() {
        return 0.0;
    }
    let total: f64 = clustering(graph).values().sum();
    total / graph.node_count() as f64
}

#[allow(clippy::cast_precision_loss)]
fn score(
    graph: &Graph,
    node: NodeIndex,
    mark: &mut [usize],
    neighbors: &mut Vec<NodeIndex>,
) -> f64 {
    let stamp = node.index();
    neighbors.clear();
    for &other in graph.successors(node).iter().chain(graph.predecessors(node)) {
        if other != node && mark[other.index()] != stamp {
            mark[other.index()] = stamp;
            neighbors.push(other);
        }
    }

    let k = neighbors.len();
    if k < 2 {
        return 0.0;
    }

    let links: usize = neighbors
        .iter()
        .map(|&u| {
            graph
                .successors(u)
                .iter()
                .filter(|&&w| w != u && mark[w.index()] == stamp)
                .count()
        })
        .sum();

    links as f64 / (k * (k - 1)) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::file_attrs;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new();
        for i in 0..n {
            g.add_node(format!("n{i}"), file_attrs("x")).unwrap();
        }
        for &(a, b) in edges {
            g.add_edge_indices(NodeIndex(a), NodeIndex(b));
        }
        g
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn fewer_than_two_neighbors_scores_zero() {
        let g = graph(3, &[(0, 1), (1, 1)]);
        let scores = clustering(&g);
        assert!(close(scores[NodeIndex(0)], 0.0));
        // The self-loop is not a neighbor
        assert!(close(scores[NodeIndex(1)], 0.0));
        assert!(close(scores[NodeIndex(2)], 0.0));
    }

    #[test]
    fn one_link_between_two_neighbors() {
        // Neighbors of 0 are {1, 2}; the single edge 1 -> 2 fills half of 2 * 1
        let g = graph(3, &[(0, 1), (0, 2), (1, 2)]);
        assert!(close(local_clustering(&g, NodeIndex(0)), 0.5));
    }

    #[test]
    fn reciprocal_links_saturate() {
        let g = graph(3, &[(0, 1), (2, 0), (1, 2), (2, 1)]);
        assert!(close(local_clustering(&g, NodeIndex(0)), 1.0));
    }

    #[test]
    fn neighbor_seen_in_both_directions_counts_once() {
        // 1 is both successor and predecessor of 0; k = 2
        let g = graph(3, &[(0, 1), (1, 0), (0, 2), (1, 2)]);
        assert!(close(local_clustering(&g, NodeIndex(0)), 0.5));
    }

    #[test]
    fn average_matches_mean_of_scores() {
        let g = graph(3, &[(0, 1), (0, 2), (1, 2)]);
        let scores = clustering(&g);
        let mean = scores.values().sum::<f64>() / 3.0;
        assert!(close(average_clustering(&g), mean));
    }

    #[test]
    fn empty_graph_average_is_zero() {
        assert!(close(average_clustering(&Graph::new()), 0.0));
    }
}
