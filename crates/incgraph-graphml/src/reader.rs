//! GraphML reading.
//!
//! The reader walks the XML event stream once and builds a [`GraphDocument`].
//! It understands the subset of GraphML that dependency-graph tools emit:
//! typed `<key>` declarations with optional defaults, a single `<graph>`, and
//! `<node>`/`<edge>` elements carrying `<data>` children. Anything else is
//! either ignored (descriptions, unknown wrapper elements) or skipped with a
//! [`Warning`] (nested graphs, hyperedges, ports).

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::model::{
    AttrType, DataEntry, EdgeRecord, GraphDocument, KeyDecl, KeyDomain, NodeRecord,
};
use crate::warning::Warning;

/// A parsed document together with the non-fatal issues found on the way.
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    /// The parsed graph.
    pub document: GraphDocument,
    /// Non-fatal issues, in document order.
    pub warnings: Vec<Warning>,
}

/// Reader for GraphML documents.
///
/// # Examples
///
/// ```
/// use incgraph_graphml::GraphMlReader;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <graphml xmlns="http://graphml.graphdrawing.org/xmlns">
///   <key id="d0" for="node" attr.name="file" attr.type="string"/>
///   <graph id="G" edgedefault="directed">
///     <node id="a"><data key="d0">base/a.h</data></node>
///     <node id="b"><data key="d0">base/b.h</data></node>
///     <edge source="a" target="b"/>
///   </graph>
/// </graphml>"#;
///
/// let outcome = GraphMlReader::read_str(xml)?;
/// assert!(outcome.document.directed);
/// assert_eq!(outcome.document.nodes.len(), 2);
/// assert_eq!(outcome.document.edges.len(), 1);
/// # Ok::<(), incgraph_graphml::Error>(())
/// ```
pub struct GraphMlReader;

impl GraphMlReader {
    /// Parse a GraphML document held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Xml`] for malformed XML and [`Error::InvalidFormat`]
    /// when the structure cannot be mapped to a graph (no `<graph>`, a node
    /// without an id, an edge without endpoints, `<data>` with no owner).
    pub fn read_str(xml: &str) -> Result<ReadOutcome> {
        // Text is not trimmed: whitespace inside <data> is part of the value.
        let mut reader = Reader::from_str(xml);

        let mut builder = DocumentBuilder::default();

        loop {
            let position = offset(reader.buffer_position());
            let event = reader.read_event().map_err(|source| Error::Xml {
                position: offset(reader.error_position()),
                source,
            })?;

            match event {
                Event::Start(element) => {
                    if builder.open(&element, position)? == Step::SkipSubtree {
                        reader
                            .read_to_end(element.name())
                            .map_err(|source| Error::Xml {
                                position: offset(reader.error_position()),
                                source,
                            })?;
                    }
                }
                Event::Empty(element) => {
                    if builder.open(&element, position)? == Step::Continue {
                        builder.close(element.local_name().as_ref());
                    }
                }
                Event::End(element) => builder.close(element.local_name().as_ref()),
                Event::Text(text) => {
                    if builder.is_collecting() {
                        let text = text
                            .unescape()
                            .map_err(|source| Error::Xml { position, source })?;
                        builder.push_text(&text);
                    }
                }
                Event::CData(data) => {
                    if builder.is_collecting() {
                        builder.push_text(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        builder.finish()
    }

    /// Read and parse a GraphML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise the same
    /// errors as [`read_str`](Self::read_str).
    pub fn read_path(path: impl AsRef<Path>) -> Result<ReadOutcome> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading GraphML");
        let xml = std::fs::read_to_string(path)?;
        Self::read_str(&xml)
    }
}

/// Positions from the XML reader are `u64` or `usize` depending on the call;
/// both fit.
fn offset<T>(value: T) -> u64
where
    u64: TryFrom<T>,
{
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    SkipSubtree,
}

/// Element currently owning `<data>` children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Graph,
    Node(usize),
    Edge(usize),
}

/// Text being accumulated for a `<data>` or `<default>` element.
#[derive(Debug)]
enum Collecting {
    Data {
        owner: Owner,
        key: String,
        text: String,
        /// Set once a child element was skipped; surrounding text is then layout.
        nested: bool,
    },
    Default { key: usize, text: String },
}

#[derive(Debug, Default)]
struct DocumentBuilder {
    seen_root: bool,
    graph_id: Option<String>,
    directed: Option<bool>,
    graph_open: bool,
    keys: Vec<KeyDecl>,
    /// Index into `keys` of an open `<key>` element.
    open_key: Option<usize>,
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
    owner: Option<Owner>,
    collecting: Option<Collecting>,
    warnings: Vec<Warning>,
}

impl DocumentBuilder {
    fn is_collecting(&self) -> bool {
        self.collecting.is_some()
    }

    fn push_text(&mut self, chunk: &str) {
        match &mut self.collecting {
            Some(Collecting::Data { text, .. } | Collecting::Default { text, .. }) => {
                text.push_str(chunk);
            }
            None => {}
        }
    }

    fn skip(&mut self, element: &str, position: u64, reason: &str) -> Step {
        debug!(element, position, reason, "Skipping GraphML element");
        self.warnings.push(Warning::SkippedElement {
            position,
            element: element.to_string(),
            reason: reason.to_string(),
        });
        Step::SkipSubtree
    }

    /// Handle an opening (or self-closing) element.
    fn open(&mut self, element: &BytesStart<'_>, position: u64) -> Result<Step> {
        let local = element.local_name();
        let name = String::from_utf8_lossy(local.as_ref()).into_owned();
        trace!(element = %name, position, "open");

        // Children of <data> are producer-specific markup (yEd graphics and
        // the like); their text is not part of the value.
        if let Some(Collecting::Data { nested, .. }) = &mut self.collecting {
            *nested = true;
            return Ok(Step::SkipSubtree);
        }

        let attrs = attributes(element, position)?;
        let attr = |wanted: &str| {
            attrs
                .iter()
                .find(|(k, _)| k == wanted)
                .map(|(_, v)| v.clone())
        };

        match name.as_str() {
            "graphml" => {
                self.seen_root = true;
                Ok(Step::Continue)
            }
            "key" => {
                let Some(id) = attr("id") else {
                    return Err(Error::invalid(format!("<key> at byte {position} has no id")));
                };
                let domain = match attr("for") {
                    None => KeyDomain::All,
                    Some(value) => match KeyDomain::parse(&value) {
                        Some(domain) => domain,
                        None => {
                            let reason = format!("unsupported key domain '{value}'");
                            return Ok(self.skip("key", position, &reason));
                        }
                    },
                };
                let attr_type = match attr("attr.type") {
                    None => AttrType::String,
                    Some(value) => AttrType::parse(&value).ok_or_else(|| {
                        Error::invalid(format!("key '{id}' has unknown attr.type '{value}'"))
                    })?,
                };
                let name = attr("attr.name").unwrap_or_else(|| id.clone());
                self.keys.push(KeyDecl::new(id, domain, name, attr_type));
                self.open_key = Some(self.keys.len() - 1);
                Ok(Step::Continue)
            }
            "default" => {
                if let Some(key) = self.open_key {
                    self.collecting = Some(Collecting::Default {
                        key,
                        text: String::new(),
                    });
                }
                Ok(Step::Continue)
            }
            "graph" => {
                if self.graph_open || self.directed.is_some() {
                    let reason = "only the first top-level graph is read";
                    return Ok(self.skip("graph", position, reason));
                }
                self.graph_open = true;
                self.graph_id = attr("id");
                self.directed = Some(attr("edgedefault").as_deref() == Some("directed"));
                self.owner = Some(Owner::Graph);
                Ok(Step::Continue)
            }
            "node" => {
                if !self.graph_open {
                    return Err(Error::invalid(format!(
                        "<node> at byte {position} is outside <graph>"
                    )));
                }
                let Some(id) = attr("id") else {
                    return Err(Error::invalid(format!("<node> at byte {position} has no id")));
                };
                self.nodes.push(NodeRecord { id, data: Vec::new() });
                self.owner = Some(Owner::Node(self.nodes.len() - 1));
                Ok(Step::Continue)
            }
            "edge" => {
                if !self.graph_open {
                    return Err(Error::invalid(format!(
                        "<edge> at byte {position} is outside <graph>"
                    )));
                }
                let (Some(source), Some(target)) = (attr("source"), attr("target")) else {
                    return Err(Error::invalid(format!(
                        "<edge> at byte {position} needs both source and target"
                    )));
                };
                self.edges.push(EdgeRecord {
                    id: attr("id"),
                    source,
                    target,
                    data: Vec::new(),
                });
                self.owner = Some(Owner::Edge(self.edges.len() - 1));
                Ok(Step::Continue)
            }
            "data" => {
                let Some(owner) = self.owner else {
                    return Err(Error::invalid(format!(
                        "<data> at byte {position} is not inside a graph, node or edge"
                    )));
                };
                let Some(key) = attr("key") else {
                    return Err(Error::invalid(format!("<data> at byte {position} has no key")));
                };
                if !self.keys.iter().any(|k| k.id == key) {
                    self.warnings.push(Warning::UndeclaredKey {
                        position,
                        key: key.clone(),
                    });
                }
                self.collecting = Some(Collecting::Data {
                    owner,
                    key,
                    text: String::new(),
                    nested: false,
                });
                Ok(Step::Continue)
            }
            "hyperedge" => Ok(self.skip("hyperedge", position, "hyperedges are not supported")),
            "port" => Ok(self.skip("port", position, "ports are not supported")),
            _ => Ok(Step::Continue),
        }
    }

    /// Handle a closing element (or the implicit close of an empty one).
    fn close(&mut self, local_name: &[u8]) {
        match local_name {
            b"data" => {
                if let Some(Collecting::Data {
                    owner,
                    key,
                    text,
                    nested,
                }) = self.collecting.take()
                {
                    let text = if nested { text.trim().to_string() } else { text };
                    let entry = DataEntry::new(key, text);
                    match owner {
                        Owner::Node(i) => self.nodes[i].data.push(entry),
                        Owner::Edge(i) => self.edges[i].data.push(entry),
                        Owner::Graph => {}
                    }
                }
            }
            b"default" => {
                if let Some(Collecting::Default { key, text }) = self.collecting.take() {
                    self.keys[key].default = Some(text);
                }
            }
            b"key" => self.open_key = None,
            b"node" | b"edge" => self.owner = Some(Owner::Graph),
            b"graph" => {
                self.graph_open = false;
                self.owner = None;
            }
            _ => {}
        }
    }

    fn finish(self) -> Result<ReadOutcome> {
        if !self.seen_root {
            return Err(Error::invalid("document has no <graphml> root element"));
        }
        let Some(directed) = self.directed else {
            return Err(Error::invalid("document has no <graph> element"));
        };
        if self.graph_open {
            return Err(Error::invalid("document ends inside <graph>"));
        }

        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            keys = self.keys.len(),
            warnings = self.warnings.len(),
            "Parsed GraphML document"
        );

        Ok(ReadOutcome {
            document: GraphDocument {
                graph_id: self.graph_id,
                directed,
                keys: self.keys,
                nodes: self.nodes,
                edges: self.edges,
            },
            warnings: self.warnings,
        })
    }
}

/// Decode all attributes of an element into `(local name, unescaped value)`.
fn attributes(element: &BytesStart<'_>, position: u64) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|source| Error::Xml { position, source })?
            .into_owned();
        out.push((key, value));
    }
    Ok(out)
}
