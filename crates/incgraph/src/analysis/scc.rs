//! Strongly connected components.
//!
//! Tarjan's algorithm, driven by an explicit stack of `(node, next
//! successor)` frames instead of recursion, so include chains thousands of
//! files deep cannot overflow the thread stack.

use std::collections::HashMap;

use tracing::debug;

use crate::graph::Graph;
use crate::types::{NodeIndex, NodeMap};

const UNVISITED: usize = usize::MAX;

/// Partition of a graph's nodes into strongly connected components.
#[derive(Debug, Clone)]
pub struct SccResult {
    /// Components in the order Tarjan's algorithm completes them (reverse
    /// topological order of the condensation); members sorted by index.
    components: Vec<Vec<NodeIndex>>,
    component_of: NodeMap<usize>,
    largest: Option<usize>,
}

impl SccResult {
    /// All components. Together they cover every node exactly once.
    #[must_use]
    pub fn components(&self) -> &[Vec<NodeIndex>] {
        &self.components
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` for the result of an empty graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Position in [`components`](Self::components) of the node's component.
    #[must_use]
    pub fn component_of(&self, node: NodeIndex) -> usize {
        self.component_of[node]
    }

    /// Returns `true` if both nodes are in the same component.
    #[must_use]
    pub fn same_component(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.component_of[a] == self.component_of[b]
    }

    /// Members of the largest component, empty for an empty graph.
    ///
    /// Among components of equal maximal size, the one holding the lowest
    /// node index is chosen.
    #[must_use]
    pub fn largest_component(&self) -> &[NodeIndex] {
        self.largest.map_or(&[], |i| &self.components[i])
    }

    /// Returns `true` if the component contains a cycle: more than one
    /// member, or a single member with a self-loop.
    #[must_use]
    pub fn is_cyclic(&self, graph: &Graph, component: usize) -> bool {
        match self.components[component].as_slice() {
            [only] => graph.has_self_loop(*only),
            members => members.len() > 1,
        }
    }

    /// Number of cyclic components.
    #[must_use]
    pub fn cyclic_count(&self, graph: &Graph) -> usize {
        (0..self.components.len())
            .filter(|&c| self.is_cyclic(graph, c))
            .count()
    }
}

/// Compute the strongly connected components of the whole graph.
#[must_use]
pub fn strongly_connected_components(graph: &Graph) -> SccResult {
    let all: Vec<NodeIndex> = graph.nodes().collect();
    let components = tarjan(graph, &all);

    let mut component_of = vec![0; graph.node_count()];
    for (c, members) in components.iter().enumerate() {
        for member in members {
            component_of[member.index()] = c;
        }
    }

    // Members are sorted, so the first element is the component's lowest index.
    let largest = components
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.len().cmp(&b.len()).then_with(|| b[0].cmp(&a[0])))
        .map(|(i, _)| i);

    debug!(
        components = components.len(),
        largest = largest.map_or(0, |i| components[i].len()),
        "Computed strongly connected components"
    );

    SccResult {
        components,
        component_of: NodeMap::from_vec(component_of),
        largest,
    }
}

/// The subgraph induced by the largest strongly connected component.
///
/// An empty graph yields an empty graph.
#[must_use]
pub fn extract_largest(graph: &Graph) -> Graph {
    let scc = strongly_connected_components(graph);
    graph.subgraph(scc.largest_component())
}

/// Tarjan's algorithm restricted to `members`.
///
/// Edges leaving the member set are ignored, which lets the cycle enumerator
/// re-split a component after removing a node. Each returned component is
/// sorted by index.
pub(crate) fn tarjan(graph: &Graph, members: &[NodeIndex]) -> Vec<Vec<NodeIndex>> {
    let n = members.len();
    let local: HashMap<NodeIndex, usize> =
        members.iter().enumerate().map(|(i, &m)| (m, i)).collect();

    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index = 0;
    let mut components = Vec::new();

    // (local node, position of the next successor to visit)
    let mut work: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }

        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        work.push((root, 0));

        while let Some(frame) = work.last_mut() {
            let v = frame.0;
            let successors = graph.successors(members[v]);

            if frame.1 < successors.len() {
                let target = successors[frame.1];
                frame.1 += 1;

                let Some(&w) = local.get(&target) else {
                    continue;
                };
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    work.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
                continue;
            }

            // All successors of v explored
            work.pop();
            if let Some(&(parent, _)) = work.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }

            if lowlink[v] == index[v] {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(members[w]);
                    if w == v {
                        break;
                    }
                }
                component.sort_unstable();
                components.push(component);
            }
        }
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::file_attrs;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new();
        for id in nodes {
            g.add_node(*id, file_attrs(id)).unwrap();
        }
        for (a, b) in edges {
            g.add_edge(a, b).unwrap();
        }
        g
    }

    fn ids(g: &Graph, members: &[NodeIndex]) -> Vec<String> {
        let mut ids: Vec<_> = members.iter().map(|&n| g.node_id(n).to_string()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn triangle_with_tail() {
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")],
        );
        let scc = strongly_connected_components(&g);

        assert_eq!(scc.len(), 2);
        assert_eq!(ids(&g, scc.largest_component()), vec!["A", "B", "C"]);
        assert!(scc.same_component(NodeIndex(0), NodeIndex(2)));
        assert!(!scc.same_component(NodeIndex(0), NodeIndex(3)));
        assert_eq!(scc.cyclic_count(&g), 1);
    }

    #[test]
    fn isolated_nodes_are_singletons() {
        let g = graph(&["a", "b", "c"], &[]);
        let scc = strongly_connected_components(&g);
        assert_eq!(scc.len(), 3);
        assert!(scc.components().iter().all(|c| c.len() == 1));
        assert_eq!(scc.cyclic_count(&g), 0);
    }

    #[test]
    fn self_loop_does_not_merge() {
        let g = graph(&["a", "b"], &[("a", "a"), ("a", "b")]);
        let scc = strongly_connected_components(&g);
        assert_eq!(scc.len(), 2);
        assert!(scc.is_cyclic(&g, scc.component_of(NodeIndex(0))));
        assert!(!scc.is_cyclic(&g, scc.component_of(NodeIndex(1))));
    }

    #[test]
    fn tie_on_size_picks_lowest_index() {
        // Two 2-cycles; {c, d} completes first in Tarjan order
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "a"), ("a", "c"), ("c", "d"), ("d", "c")],
        );
        let scc = strongly_connected_components(&g);
        assert_eq!(ids(&g, scc.largest_component()), vec!["a", "b"]);
        assert_eq!(
            scc.largest_component(),
            strongly_connected_components(&g).largest_component()
        );
    }

    #[test]
    fn extract_largest_of_empty_graph_is_empty() {
        let extracted = extract_largest(&Graph::new());
        assert!(extracted.is_empty());
    }

    #[test]
    fn extract_largest_keeps_internal_edges_only() {
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")],
        );
        let extracted = extract_largest(&g);
        assert_eq!(extracted.node_count(), 3);
        assert_eq!(extracted.edge_count(), 3);
        assert!(extracted.index_of("D").is_none());
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let n = 200_000;
        let mut g = Graph::with_capacity(n, n);
        for i in 0..n {
            g.add_node(i.to_string(), file_attrs("x")).unwrap();
        }
        for i in 0..n {
            g.add_edge_indices(NodeIndex(i), NodeIndex((i + 1) % n));
        }
        let scc = strongly_connected_components(&g);
        assert_eq!(scc.len(), 1);
        assert_eq!(scc.largest_component().len(), n);
    }

    #[test]
    fn restricted_tarjan_ignores_outside_edges() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let parts = tarjan(&g, &[NodeIndex(0), NodeIndex(1)]);
        assert_eq!(parts.len(), 2);
    }
}
