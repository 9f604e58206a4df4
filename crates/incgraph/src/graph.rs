//! In-memory directed graph store.
//!
//! Nodes are addressed by a dense [`NodeIndex`] assigned in insertion order;
//! the string id from the input is kept alongside for lookups and output.
//! Forward and reverse adjacency lists are maintained on every insert, so
//! degree and neighbor queries never scan the edge list.
//!
//! ## Invariants
//!
//! - Node ids are unique (`add_node` rejects duplicates)
//! - Every edge endpoint exists (`add_edge` rejects dangling endpoints)
//! - An ordered pair is stored at most once; repeated inserts are no-ops
//! - Self-loops are allowed and count toward both in- and out-degree

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::types::{AttrValue, Attributes, FILE_ATTR, NodeIndex};

/// Directed graph with per-node attributes.
///
/// # Examples
///
/// ```
/// use incgraph::{Graph, file_attrs};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("a", file_attrs("base/a.h"))?;
/// let b = graph.add_node("b", file_attrs("base/b.h"))?;
/// graph.add_edge("a", "b")?;
///
/// assert_eq!(graph.out_degree(a), 1);
/// assert_eq!(graph.in_degree(b), 1);
/// assert_eq!(graph.successors(a), &[b]);
/// # Ok::<(), incgraph::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    ids: Vec<String>,
    lookup: HashMap<String, NodeIndex>,
    attrs: Vec<Attributes>,
    successors: Vec<Vec<NodeIndex>>,
    predecessors: Vec<Vec<NodeIndex>>,
    /// Edges in insertion order.
    edges: Vec<(NodeIndex, NodeIndex)>,
    edge_set: HashSet<(NodeIndex, NodeIndex)>,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for the given number of nodes and edges.
    #[must_use]
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            ids: Vec::with_capacity(nodes),
            lookup: HashMap::with_capacity(nodes),
            attrs: Vec::with_capacity(nodes),
            successors: Vec::with_capacity(nodes),
            predecessors: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            edge_set: HashSet::with_capacity(edges),
        }
    }

    // === Construction ===

    /// Add a node with its attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateNode`] if a node with this id already exists.
    pub fn add_node(&mut self, id: impl Into<String>, attrs: Attributes) -> Result<NodeIndex> {
        let id = id.into();
        if self.lookup.contains_key(&id) {
            return Err(Error::DuplicateNode(id));
        }

        let index = NodeIndex(self.ids.len());
        self.lookup.insert(id.clone(), index);
        self.ids.push(id);
        self.attrs.push(attrs);
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        Ok(index)
    }

    /// Add the edge `from -> to` by node id.
    ///
    /// Returns `true` if the edge is new, `false` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingEdge`] if either endpoint does not exist.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<bool> {
        let dangling = |missing: &str| Error::DanglingEdge {
            from: from.to_string(),
            to: to.to_string(),
            missing: missing.to_string(),
        };
        let source = self.index_of(from).ok_or_else(|| dangling(from))?;
        let target = self.index_of(to).ok_or_else(|| dangling(to))?;
        Ok(self.add_edge_indices(source, target))
    }

    /// Add the edge `from -> to` by index.
    ///
    /// Returns `true` if the edge is new.
    ///
    /// # Panics
    ///
    /// Panics if either index does not belong to this graph.
    pub fn add_edge_indices(&mut self, from: NodeIndex, to: NodeIndex) -> bool {
        assert!(
            from.0 < self.ids.len() && to.0 < self.ids.len(),
            "edge endpoint out of range"
        );
        if !self.edge_set.insert((from, to)) {
            return false;
        }
        self.successors[from.0].push(to);
        self.predecessors[to.0].push(from);
        self.edges.push((from, to));
        true
    }

    // === Size ===

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of (deduplicated) edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    // === Structure ===

    /// All node indices in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeIndex> + use<> {
        (0..self.ids.len()).map(NodeIndex)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.edges.iter().copied()
    }

    /// Nodes this node points to, in edge insertion order.
    #[must_use]
    pub fn successors(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.successors[node.0]
    }

    /// Nodes pointing to this node, in edge insertion order.
    #[must_use]
    pub fn predecessors(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.predecessors[node.0]
    }

    /// Number of incoming edges (a self-loop counts once).
    #[must_use]
    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.predecessors[node.0].len()
    }

    /// Number of outgoing edges (a self-loop counts once).
    #[must_use]
    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.successors[node.0].len()
    }

    /// Returns `true` if the edge `from -> to` exists.
    #[must_use]
    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.edge_set.contains(&(from, to))
    }

    /// Returns `true` if the node has an edge to itself.
    #[must_use]
    pub fn has_self_loop(&self, node: NodeIndex) -> bool {
        self.has_edge(node, node)
    }

    // === Identity and attributes ===

    /// Look up a node by its id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.lookup.get(id).copied()
    }

    /// The id the node was added with.
    #[must_use]
    pub fn node_id(&self, node: NodeIndex) -> &str {
        &self.ids[node.0]
    }

    /// All attributes of a node.
    #[must_use]
    pub fn attributes(&self, node: NodeIndex) -> &Attributes {
        &self.attrs[node.0]
    }

    /// A single attribute of a node.
    #[must_use]
    pub fn attribute(&self, node: NodeIndex, key: &str) -> Option<&AttrValue> {
        self.attrs[node.0].get(key)
    }

    /// Set (or overwrite) an attribute of a node.
    pub fn set_attribute(&mut self, node: NodeIndex, key: &str, value: impl Into<AttrValue>) {
        self.attrs[node.0].insert(key.to_string(), value.into());
    }

    /// The node's `file` attribute, or `""` if it is missing or not a string.
    #[must_use]
    pub fn file(&self, node: NodeIndex) -> &str {
        self.attribute(node, FILE_ATTR)
            .and_then(AttrValue::as_str)
            .unwrap_or("")
    }

    /// Name used in reports: the `file` attribute, falling back to the id.
    #[must_use]
    pub fn display_name(&self, node: NodeIndex) -> &str {
        self.attribute(node, FILE_ATTR)
            .and_then(AttrValue::as_str)
            .unwrap_or_else(|| self.node_id(node))
    }

    // === Derivation ===

    /// Build the subgraph induced by `members`.
    ///
    /// The result holds exactly the given nodes (attributes copied, original
    /// insertion order kept, duplicates in `members` ignored) and every edge
    /// whose endpoints are both members. The original graph is untouched.
    #[must_use]
    pub fn subgraph(&self, members: &[NodeIndex]) -> Graph {
        let mut keep = vec![false; self.node_count()];
        for &member in members {
            keep[member.0] = true;
        }

        let mut remap: Vec<Option<NodeIndex>> = vec![None; self.node_count()];
        let mut sub = Graph::with_capacity(members.len(), 0);
        for node in self.nodes().filter(|n| keep[n.0]) {
            let index = NodeIndex(sub.ids.len());
            sub.lookup.insert(self.ids[node.0].clone(), index);
            sub.ids.push(self.ids[node.0].clone());
            sub.attrs.push(self.attrs[node.0].clone());
            sub.successors.push(Vec::new());
            sub.predecessors.push(Vec::new());
            remap[node.0] = Some(index);
        }

        for (from, to) in self.edges() {
            if let (Some(from), Some(to)) = (remap[from.0], remap[to.0]) {
                sub.add_edge_indices(from, to);
            }
        }

        sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::file_attrs;

    fn chain() -> Graph {
        let mut graph = Graph::new();
        for id in ["a", "b", "c"] {
            graph.add_node(id, file_attrs(&format!("dir/{id}.h"))).unwrap();
        }
        graph.add_edge("a", "b").unwrap();
        graph.add_edge("b", "c").unwrap();
        graph
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut graph = chain();
        let err = graph.add_node("b", Attributes::new()).unwrap_err();
        assert!(matches!(err, Error::DuplicateNode(ref id) if id == "b"));
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn dangling_edge_names_missing_endpoint() {
        let mut graph = chain();
        let err = graph.add_edge("a", "zzz").unwrap_err();
        assert!(matches!(err, Error::DanglingEdge { ref missing, .. } if missing == "zzz"));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn repeated_edge_is_stored_once() {
        let mut graph = chain();
        assert!(!graph.add_edge("a", "b").unwrap());
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.out_degree(NodeIndex(0)), 1);
    }

    #[test]
    fn self_loop_counts_toward_both_degrees() {
        let mut graph = chain();
        assert!(graph.add_edge("b", "b").unwrap());
        let b = graph.index_of("b").unwrap();
        assert_eq!(graph.in_degree(b), 2);
        assert_eq!(graph.out_degree(b), 2);
        assert!(graph.has_self_loop(b));
    }

    #[test]
    fn predecessors_mirror_successors() {
        let graph = chain();
        let b = graph.index_of("b").unwrap();
        assert_eq!(graph.predecessors(b), &[NodeIndex(0)]);
        assert_eq!(graph.successors(b), &[NodeIndex(2)]);
    }

    #[test]
    fn attributes_can_be_overwritten() {
        let mut graph = chain();
        let a = NodeIndex(0);
        graph.set_attribute(a, "color", "#FFFFFF");
        graph.set_attribute(a, "color", "#000000");
        assert_eq!(graph.attribute(a, "color").and_then(AttrValue::as_str), Some("#000000"));
        assert_eq!(graph.file(a), "dir/a.h");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut graph = Graph::new();
        let n = graph.add_node("orphan", Attributes::new()).unwrap();
        assert_eq!(graph.file(n), "");
        assert_eq!(graph.display_name(n), "orphan");
    }

    #[test]
    fn subgraph_keeps_only_internal_edges() {
        let graph = chain();
        let sub = graph.subgraph(&[NodeIndex(2), NodeIndex(1)]);

        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.edge_count(), 1);
        // Insertion order of the original graph is preserved
        assert_eq!(sub.node_id(NodeIndex(0)), "b");
        assert_eq!(sub.file(NodeIndex(1)), "dir/c.h");
        assert_eq!(graph.node_count(), 3, "original must be untouched");
    }

    #[test]
    fn empty_subgraph_is_empty_graph() {
        let sub = chain().subgraph(&[]);
        assert!(sub.is_empty());
        assert_eq!(sub.edge_count(), 0);
    }
}
