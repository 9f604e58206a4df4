//! GraphML writing.
//!
//! Output is indented, starts with an XML declaration and carries the
//! standard GraphML namespace so that Gephi, yEd and networkx accept it.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Error, Result};
use crate::model::{DataEntry, GraphDocument, KeyDecl};

/// The GraphML namespace URI.
pub const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd";

/// Writer for GraphML documents.
///
/// # Examples
///
/// ```
/// use incgraph_graphml::{GraphDocument, GraphMlWriter, NodeRecord};
///
/// let mut doc = GraphDocument::directed();
/// doc.nodes.push(NodeRecord { id: "a".to_string(), data: Vec::new() });
///
/// let xml = GraphMlWriter::to_string(&doc)?;
/// assert!(xml.starts_with("<?xml"));
/// assert!(xml.contains(r#"<node id="a"/>"#));
/// # Ok::<(), incgraph_graphml::Error>(())
/// ```
pub struct GraphMlWriter;

impl GraphMlWriter {
    /// Serialize a document into any [`Write`] sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying sink fails.
    pub fn write_document<W: Write>(doc: &GraphDocument, sink: W) -> Result<()> {
        let mut writer = Writer::new_with_indent(sink, b' ', 2);

        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("graphml");
        root.push_attribute(("xmlns", GRAPHML_NS));
        root.push_attribute(("xmlns:xsi", XSI_NS));
        root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
        emit(&mut writer, Event::Start(root))?;

        for key in &doc.keys {
            write_key(&mut writer, key)?;
        }

        let mut graph = BytesStart::new("graph");
        if let Some(id) = &doc.graph_id {
            graph.push_attribute(("id", id.as_str()));
        }
        graph.push_attribute((
            "edgedefault",
            if doc.directed { "directed" } else { "undirected" },
        ));
        emit(&mut writer, Event::Start(graph))?;

        for node in &doc.nodes {
            let mut element = BytesStart::new("node");
            element.push_attribute(("id", node.id.as_str()));
            write_owner(&mut writer, element, "node", &node.data)?;
        }

        for edge in &doc.edges {
            let mut element = BytesStart::new("edge");
            if let Some(id) = &edge.id {
                element.push_attribute(("id", id.as_str()));
            }
            element.push_attribute(("source", edge.source.as_str()));
            element.push_attribute(("target", edge.target.as_str()));
            write_owner(&mut writer, element, "edge", &edge.data)?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("graph")))?;
        emit(&mut writer, Event::End(BytesEnd::new("graphml")))?;

        let mut sink = writer.into_inner();
        sink.write_all(b"\n")?;
        sink.flush()?;
        Ok(())
    }

    /// Serialize a document into a `String`.
    ///
    /// # Errors
    ///
    /// Only fails if serialization itself fails, which does not happen for an
    /// in-memory buffer in practice.
    pub fn to_string(doc: &GraphDocument) -> Result<String> {
        let mut buffer = Vec::new();
        Self::write_document(doc, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::invalid(e.to_string()))
    }
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
}

fn write_key<W: Write>(writer: &mut Writer<W>, key: &KeyDecl) -> Result<()> {
    let mut element = BytesStart::new("key");
    element.push_attribute(("id", key.id.as_str()));
    element.push_attribute(("for", key.domain.as_str()));
    element.push_attribute(("attr.name", key.name.as_str()));
    element.push_attribute(("attr.type", key.attr_type.as_str()));

    match &key.default {
        None => emit(writer, Event::Empty(element)),
        Some(default) => {
            emit(writer, Event::Start(element))?;
            emit(writer, Event::Start(BytesStart::new("default")))?;
            emit(writer, Event::Text(BytesText::new(default)))?;
            emit(writer, Event::End(BytesEnd::new("default")))?;
            emit(writer, Event::End(BytesEnd::new("key")))
        }
    }
}

/// Write a node or edge element with its `<data>` children.
fn write_owner<W: Write>(
    writer: &mut Writer<W>,
    element: BytesStart<'_>,
    name: &str,
    data: &[DataEntry],
) -> Result<()> {
    if data.is_empty() {
        return emit(writer, Event::Empty(element));
    }

    emit(writer, Event::Start(element))?;
    for entry in data {
        let mut data_element = BytesStart::new("data");
        data_element.push_attribute(("key", entry.key.as_str()));
        if entry.value.is_empty() {
            emit(writer, Event::Empty(data_element))?;
        } else {
            emit(writer, Event::Start(data_element))?;
            emit(writer, Event::Text(BytesText::new(&entry.value)))?;
            emit(writer, Event::End(BytesEnd::new("data")))?;
        }
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}
