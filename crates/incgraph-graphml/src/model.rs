//! In-memory model of a GraphML document.
//!
//! The model is deliberately close to the XML: keys, nodes and edges keep
//! their raw string values. Typed decoding is left to the consumer, which
//! knows what each attribute means.

use std::fmt;

/// Which elements a `<key>` declaration applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyDomain {
    /// `for="node"`
    Node,
    /// `for="edge"`
    Edge,
    /// `for="graph"`
    Graph,
    /// `for="all"` (also the default when `for` is absent)
    All,
}

impl KeyDomain {
    /// Parse the value of a `for` attribute.
    ///
    /// # Returns
    ///
    /// `None` for domains this crate does not model (`port`, `hyperedge`, ...).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "node" => Some(Self::Node),
            "edge" => Some(Self::Edge),
            "graph" => Some(Self::Graph),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// The attribute value written for this domain.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Graph => "graph",
            Self::All => "all",
        }
    }

    /// Returns `true` if keys of this domain may annotate nodes.
    #[must_use]
    pub fn applies_to_nodes(self) -> bool {
        matches!(self, Self::Node | Self::All)
    }
}

/// Declared value type of a key (`attr.type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttrType {
    /// `boolean`
    Boolean,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `string`, and the GraphML default when `attr.type` is absent
    #[default]
    String,
}

impl AttrType {
    /// Parse the value of an `attr.type` attribute.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "boolean" => Some(Self::Boolean),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    /// The attribute value written for this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `<key>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDecl {
    /// Key id referenced by `<data key="...">`.
    pub id: String,
    /// Elements the key applies to.
    pub domain: KeyDomain,
    /// Human-readable attribute name (`attr.name`); falls back to the id.
    pub name: String,
    /// Declared value type.
    pub attr_type: AttrType,
    /// Value of the nested `<default>` element, if any.
    pub default: Option<String>,
}

impl KeyDecl {
    /// Create a key declaration without a default value.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        domain: KeyDomain,
        name: impl Into<String>,
        attr_type: AttrType,
    ) -> Self {
        Self {
            id: id.into(),
            domain,
            name: name.into(),
            attr_type,
            default: None,
        }
    }
}

/// A `<data>` entry: key id plus raw text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    /// Referenced key id.
    pub key: String,
    /// Raw (unescaped) text content.
    pub value: String,
}

impl DataEntry {
    /// Create a data entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A `<node>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Node id, unique within the document.
    pub id: String,
    /// Attached data entries in document order.
    pub data: Vec<DataEntry>,
}

/// An `<edge>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Optional edge id.
    pub id: Option<String>,
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Attached data entries in document order.
    pub data: Vec<DataEntry>,
}

/// A parsed GraphML document holding a single graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphDocument {
    /// The `id` of the `<graph>` element.
    pub graph_id: Option<String>,
    /// `edgedefault="directed"` (the GraphML default is undirected).
    pub directed: bool,
    /// Key declarations in document order.
    pub keys: Vec<KeyDecl>,
    /// Nodes in document order.
    pub nodes: Vec<NodeRecord>,
    /// Edges in document order.
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    /// Create an empty directed document.
    #[must_use]
    pub fn directed() -> Self {
        Self {
            graph_id: Some("G".to_string()),
            directed: true,
            keys: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Find a key declaration by id.
    #[must_use]
    pub fn key(&self, id: &str) -> Option<&KeyDecl> {
        self.keys.iter().find(|k| k.id == id)
    }
}
