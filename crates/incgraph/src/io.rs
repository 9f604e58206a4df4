//! Conversion between GraphML documents and [`Graph`].
//!
//! Loading decodes every node `<data>` value by its key's declared type and
//! fills in key defaults for nodes that omit a value. Edge data is not kept.
//! Saving regenerates the key table from the attributes present on the
//! graph's nodes.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use incgraph_graphml::{
    AttrType, DataEntry, EdgeRecord, GraphDocument, GraphMlReader, KeyDecl, KeyDomain,
    NodeRecord, Warning, write_graphml_atomic,
};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::{AttrValue, Attributes};

/// Non-fatal findings from loading a graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Edges dropped because the same ordered pair appeared earlier.
    pub duplicate_edges: usize,
    /// Values that did not parse as their declared type and were kept as text.
    pub undecodable_values: usize,
    /// Issues reported by the GraphML reader.
    pub warnings: Vec<Warning>,
}

/// Read a GraphML file into a graph.
///
/// # Errors
///
/// Returns [`Error::GraphMl`] if the file cannot be read or parsed,
/// [`Error::UndirectedGraph`] for an undirected graph, and
/// [`Error::DuplicateNode`] / [`Error::DanglingEdge`] for inconsistent
/// node and edge lists.
pub fn load_graph(path: impl AsRef<Path>) -> Result<(Graph, LoadReport)> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading graph");

    let outcome = GraphMlReader::read_path(path)?;
    for warning in &outcome.warnings {
        warn!(position = warning.position(), kind = warning.kind(), "{}", warning.description());
    }

    let (graph, mut report) = graph_from_document(&outcome.document)?;
    report.warnings = outcome.warnings;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Loaded graph"
    );
    Ok((graph, report))
}

/// How to decode the values of one key.
struct NodeKey<'d> {
    name: &'d str,
    attr_type: AttrType,
}

/// Build a graph from a parsed document.
///
/// # Errors
///
/// See [`load_graph`].
pub fn graph_from_document(doc: &GraphDocument) -> Result<(Graph, LoadReport)> {
    if !doc.directed {
        return Err(Error::UndirectedGraph);
    }

    let node_keys: HashMap<&str, NodeKey<'_>> = doc
        .keys
        .iter()
        .filter(|key| key.domain.applies_to_nodes())
        .map(|key| {
            (
                key.id.as_str(),
                NodeKey {
                    name: &key.name,
                    attr_type: key.attr_type,
                },
            )
        })
        .collect();

    let mut report = LoadReport::default();

    let mut defaults = Attributes::new();
    for key in doc.keys.iter().filter(|k| k.domain.applies_to_nodes()) {
        if let Some(default) = &key.default {
            let value = decode(default, key.attr_type, &mut report);
            defaults.insert(key.name.clone(), value);
        }
    }

    let mut graph = Graph::with_capacity(doc.nodes.len(), doc.edges.len());
    for node in &doc.nodes {
        let mut attrs = defaults.clone();
        for entry in &node.data {
            let (name, value) = match node_keys.get(entry.key.as_str()) {
                Some(key) => (key.name, decode(&entry.value, key.attr_type, &mut report)),
                // Undeclared keys were already reported by the reader
                None => (entry.key.as_str(), AttrValue::from(entry.value.as_str())),
            };
            attrs.insert(name.to_string(), value);
        }
        graph.add_node(node.id.as_str(), attrs)?;
    }

    for edge in &doc.edges {
        if !graph.add_edge(&edge.source, &edge.target)? {
            debug!(source = %edge.source, target = %edge.target, "Dropped duplicate edge");
            report.duplicate_edges += 1;
        }
    }

    if report.duplicate_edges > 0 {
        warn!(count = report.duplicate_edges, "Dropped duplicate edges");
    }
    if report.undecodable_values > 0 {
        warn!(
            count = report.undecodable_values,
            "Kept values that do not match their declared type as text"
        );
    }

    Ok((graph, report))
}

fn decode(raw: &str, attr_type: AttrType, report: &mut LoadReport) -> AttrValue {
    let text = raw.trim();
    let parsed = match attr_type {
        AttrType::String => return AttrValue::from(raw),
        AttrType::Boolean => match text.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(AttrValue::Bool(true)),
            "false" | "0" => Some(AttrValue::Bool(false)),
            _ => None,
        },
        AttrType::Int | AttrType::Long => text.parse().ok().map(AttrValue::Int),
        AttrType::Float | AttrType::Double => text.parse().ok().map(AttrValue::Float),
    };
    parsed.unwrap_or_else(|| {
        report.undecodable_values += 1;
        AttrValue::from(raw)
    })
}

/// Convert a graph into a GraphML document.
///
/// One node key is declared per attribute name, in sorted name order with
/// ids `d0`, `d1`, ... Each key's type is inferred from its values; a name
/// whose values mix types is declared as a string.
#[must_use]
pub fn graph_to_document(graph: &Graph) -> GraphDocument {
    let mut types: BTreeMap<&str, AttrType> = BTreeMap::new();
    for node in graph.nodes() {
        for (name, value) in graph.attributes(node) {
            let attr_type = type_of(value);
            types
                .entry(name.as_str())
                .and_modify(|existing| {
                    if *existing != attr_type {
                        *existing = AttrType::String;
                    }
                })
                .or_insert(attr_type);
        }
    }

    let mut doc = GraphDocument::directed();
    let mut ids: HashMap<&str, String> = HashMap::with_capacity(types.len());
    for (i, (name, attr_type)) in types.iter().enumerate() {
        let id = format!("d{i}");
        doc.keys
            .push(KeyDecl::new(id.clone(), KeyDomain::Node, *name, *attr_type));
        ids.insert(*name, id);
    }

    doc.nodes = graph
        .nodes()
        .map(|node| NodeRecord {
            id: graph.node_id(node).to_string(),
            data: graph
                .attributes(node)
                .iter()
                .map(|(name, value)| DataEntry::new(ids[name.as_str()].clone(), value.to_string()))
                .collect(),
        })
        .collect();

    doc.edges = graph
        .edges()
        .map(|(from, to)| EdgeRecord {
            id: None,
            source: graph.node_id(from).to_string(),
            target: graph.node_id(to).to_string(),
            data: Vec::new(),
        })
        .collect();

    doc
}

fn type_of(value: &AttrValue) -> AttrType {
    match value {
        AttrValue::String(_) => AttrType::String,
        AttrValue::Int(_) => AttrType::Long,
        AttrValue::Float(_) => AttrType::Double,
        AttrValue::Bool(_) => AttrType::Boolean,
    }
}

/// Write a graph to a GraphML file, replacing it atomically.
///
/// # Errors
///
/// Returns [`Error::GraphMl`] if the file cannot be written.
pub fn save_graph(graph: &Graph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_graphml_atomic(path, &graph_to_document(graph))?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Wrote graph"
    );
    Ok(())
}
