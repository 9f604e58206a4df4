//! Integration tests for read/write round-trip operations.
//!
//! Documents written with `GraphMlWriter` must read back identically with
//! `GraphMlReader`, both in memory and through files on disk.

use incgraph_graphml::{
    AttrType, DataEntry, EdgeRecord, GraphDocument, GraphMlReader, GraphMlWriter, KeyDecl,
    KeyDomain, NodeRecord, write_graphml_atomic,
};
use rstest::rstest;

fn node(id: &str, file: &str) -> NodeRecord {
    NodeRecord {
        id: id.to_string(),
        data: vec![DataEntry::new("d0", file)],
    }
}

fn edge(source: &str, target: &str) -> EdgeRecord {
    EdgeRecord {
        id: None,
        source: source.to_string(),
        target: target.to_string(),
        data: Vec::new(),
    }
}

fn include_graph() -> GraphDocument {
    let mut doc = GraphDocument::directed();
    doc.keys.push(KeyDecl::new("d0", KeyDomain::Node, "file", AttrType::String));
    doc.keys.push(KeyDecl::new("d1", KeyDomain::Node, "weight", AttrType::Double));
    doc.nodes.push(node("0", "base/logging.h"));
    doc.nodes.push(node("1", "base/check.h"));
    doc.nodes.push(node("2", "net/socket.h"));
    doc.nodes[2].data.push(DataEntry::new("d1", "0.5"));
    doc.edges.push(edge("0", "1"));
    doc.edges.push(edge("2", "0"));
    doc
}

fn roundtrip(doc: &GraphDocument) -> GraphDocument {
    let xml = GraphMlWriter::to_string(doc).unwrap();
    GraphMlReader::read_str(&xml).unwrap().document
}

#[test]
fn include_graph_survives_roundtrip() {
    let original = include_graph();
    assert_eq!(roundtrip(&original), original);
}

#[rstest]
#[case::ampersand("third_party/a&b/c.h")]
#[case::angle_brackets("gen/<generated>.h")]
#[case::quotes("tools/\"quoted\"/'x'.h")]
#[case::unicode("ui/\u{4e16}\u{754c}/\u{00e9}.h")]
#[case::spaces_inside("docs/with space.h")]
#[case::trailing_space("base/x.h ")]
#[case::leading_space(" base/x.h")]
#[case::only_whitespace("  ")]
fn file_values_survive_roundtrip(#[case] file: &str) {
    let mut doc = GraphDocument::directed();
    doc.keys.push(KeyDecl::new("d0", KeyDomain::Node, "file", AttrType::String));
    doc.nodes.push(node("n", file));

    let read_back = roundtrip(&doc);
    assert_eq!(read_back.nodes[0].data[0].value, file);
}

#[rstest]
#[case::directed(true)]
#[case::undirected(false)]
fn edge_default_survives_roundtrip(#[case] directed: bool) {
    let mut doc = include_graph();
    doc.directed = directed;
    assert_eq!(roundtrip(&doc).directed, directed);
}

#[test]
fn key_defaults_survive_roundtrip() {
    let mut doc = include_graph();
    doc.keys[1].default = Some("1.0".to_string());
    assert_eq!(roundtrip(&doc).keys[1].default.as_deref(), Some("1.0"));
}

#[test]
fn file_roundtrip_through_atomic_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("include.graphml");
    let original = include_graph();

    write_graphml_atomic(&path, &original).unwrap();
    let outcome = GraphMlReader::read_path(&path).unwrap();

    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.document, original);
}

#[test]
fn networkx_style_document_is_accepted() {
    let xml = r#"<?xml version='1.0' encoding='utf-8'?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">
  <key id="d0" for="node" attr.name="file" attr.type="string" />
  <graph edgedefault="directed">
    <node id="base/a.h">
      <data key="d0">base/a.h</data>
    </node>
    <node id="base/b.h">
      <data key="d0">base/b.h</data>
    </node>
    <edge source="base/a.h" target="base/b.h" />
  </graph>
</graphml>
"#;
    let outcome = GraphMlReader::read_str(xml).unwrap();
    let doc = outcome.document;

    assert!(doc.directed);
    assert_eq!(doc.graph_id, None);
    assert_eq!(doc.nodes.len(), 2);
    assert_eq!(doc.nodes[1].data, vec![DataEntry::new("d0", "base/b.h")]);
    assert_eq!(doc.edges[0].source, "base/a.h");
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GraphMlReader::read_path(dir.path().join("absent.graphml")).unwrap_err();
    assert!(matches!(err, incgraph_graphml::Error::Io(_)));
}
