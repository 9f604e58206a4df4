//! Property tests over random directed graphs.

use std::collections::HashSet;

use proptest::prelude::*;

use incgraph::{
    CycleLimits, DegreeAnalyzer, Graph, NodeIndex, Palette, SimpleCycles, apply_labels, classify,
    clustering, count_simple_cycles, extract_largest, file_attrs, strongly_connected_components,
};

const COMPONENTS: [&str; 4] = ["base", "ui", "net", "zzz"];

/// Build a graph of `n` nodes spread over a few components.
fn build_graph(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new();
    for i in 0..n {
        let path = format!("{}/f{i}.h", COMPONENTS[i % COMPONENTS.len()]);
        graph
            .add_node(format!("n{i}"), file_attrs(&path))
            .expect("ids are unique");
    }
    for &(a, b) in edges {
        if a < n && b < n {
            graph.add_edge_indices(NodeIndex(a), NodeIndex(b));
        }
    }
    graph
}

fn graph_strategy(max_nodes: usize) -> impl Strategy<Value = Graph> {
    (1..=max_nodes).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..n * 3)
            .prop_map(move |edges| build_graph(n, &edges))
    })
}

/// Nodes reachable from `start`, `start` included.
fn reachable(graph: &Graph, start: NodeIndex) -> HashSet<NodeIndex> {
    let mut seen = HashSet::from([start]);
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        for &next in graph.successors(node) {
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    seen
}

proptest! {
    #[test]
    fn degree_sums_equal_edge_count(graph in graph_strategy(30)) {
        let degrees = DegreeAnalyzer::new(&graph);
        let in_sum: usize = degrees.in_degree_map().values().sum();
        let out_sum: usize = degrees.out_degree_map().values().sum();
        prop_assert_eq!(in_sum, graph.edge_count());
        prop_assert_eq!(out_sum, graph.edge_count());
    }

    #[test]
    fn centrality_is_non_negative(graph in graph_strategy(30)) {
        let centrality = DegreeAnalyzer::new(&graph).degree_centrality();
        prop_assert_eq!(centrality.len(), graph.node_count());
        prop_assert!(centrality.values().all(|&c| c >= 0.0));
    }

    #[test]
    fn components_partition_the_nodes(graph in graph_strategy(30)) {
        let scc = strongly_connected_components(&graph);
        let mut seen = vec![0_usize; graph.node_count()];
        for component in scc.components() {
            for node in component {
                seen[node.index()] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn component_members_are_mutually_reachable(graph in graph_strategy(20)) {
        let scc = strongly_connected_components(&graph);
        let reach: Vec<HashSet<NodeIndex>> = graph.nodes().map(|n| reachable(&graph, n)).collect();
        for a in graph.nodes() {
            for b in graph.nodes() {
                let mutual = reach[a.index()].contains(&b) && reach[b.index()].contains(&a);
                prop_assert_eq!(scc.same_component(a, b), mutual);
            }
        }
    }

    #[test]
    fn extracted_component_is_induced(graph in graph_strategy(25)) {
        let scc = strongly_connected_components(&graph);
        let largest = scc.largest_component().to_vec();
        let extracted = extract_largest(&graph);

        prop_assert_eq!(extracted.node_count(), largest.len());
        let members: HashSet<&str> = largest.iter().map(|&n| graph.node_id(n)).collect();
        let internal = graph
            .edges()
            .filter(|(a, b)| {
                members.contains(graph.node_id(*a)) && members.contains(graph.node_id(*b))
            })
            .count();
        prop_assert_eq!(extracted.edge_count(), internal);
        for (a, b) in extracted.edges() {
            prop_assert!(members.contains(extracted.node_id(a)));
            prop_assert!(members.contains(extracted.node_id(b)));
        }
    }

    #[test]
    fn clustering_is_a_fraction(graph in graph_strategy(25)) {
        for (node, &score) in clustering(&graph).iter() {
            prop_assert!((0.0..=1.0).contains(&score), "node {} scored {}", node, score);
        }
    }

    #[test]
    fn annotation_is_idempotent(graph in graph_strategy(25), top in 0_usize..12) {
        let palette = Palette::chromium();
        let mut once = graph.clone();
        classify(&mut once, &palette);
        apply_labels(&mut once, top);

        let mut twice = once.clone();
        classify(&mut twice, &palette);
        apply_labels(&mut twice, top);

        for node in once.nodes() {
            prop_assert_eq!(once.attributes(node), twice.attributes(node));
        }
    }

    #[test]
    fn cycles_are_distinct_and_closed(graph in graph_strategy(7)) {
        let mut seen = HashSet::new();
        for mut cycle in SimpleCycles::new(&graph) {
            prop_assert!(graph.has_edge(cycle[cycle.len() - 1], cycle[0]));
            for pair in cycle.windows(2) {
                prop_assert!(graph.has_edge(pair[0], pair[1]));
            }
            let distinct: HashSet<_> = cycle.iter().collect();
            prop_assert_eq!(distinct.len(), cycle.len(), "cycles must be simple");

            let min = (0..cycle.len()).min_by_key(|&i| cycle[i]).unwrap_or(0);
            cycle.rotate_left(min);
            prop_assert!(seen.insert(cycle), "cycle reported twice");
        }

        let count = count_simple_cycles(&graph, &CycleLimits::unbounded());
        prop_assert_eq!(count.count, seen.len() as u64);
    }
}
