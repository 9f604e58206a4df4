//! Domain types for include-graph analysis.
//!
//! - **Identity**: `NodeIndex` (dense, internal) next to the opaque string id
//!   each node carries from the input
//! - **Attributes**: `AttrValue`, `Attributes`, and the well-known attribute
//!   names this crate reads and writes
//! - **Presentation**: `Label`, the shown/hidden label written for Gephi
//! - **Results**: `NodeMap<T>` (one value per node) and `Ranked<T>`
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Node identity | Dense `usize` index | Algorithms index arrays instead of hashing ids |
//! | Attribute map | `BTreeMap` | Deterministic serialization order |
//! | Label | Enum, not magic string | The `____` sentinel only exists at the I/O boundary |

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use serde::Serialize;

/// Attribute holding the node's slash-separated source path.
pub const FILE_ATTR: &str = "file";
/// Attribute written by the classifier: first path segment.
pub const COMPONENT_ATTR: &str = "component";
/// Attribute written by the classifier: hex RGB color.
pub const COLOR_ATTR: &str = "color";
/// Attribute written by the labeling pass.
pub const LABEL_ATTR: &str = "label";

/// Serialized form of [`Label::Hidden`].
///
/// Gephi renders the node id when a label is empty, so hidden labels are
/// written as a non-empty placeholder that no real path can equal.
pub const HIDDEN_LABEL: &str = "____";

// ============================================================================
// Node identity
// ============================================================================

/// Dense index of a node inside one [`Graph`](crate::Graph).
///
/// Indices are assigned in insertion order starting at 0 and are only
/// meaningful for the graph that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    /// Extract the raw position.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// A node attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Text
    String(String),
    /// Integer (`int`/`long` in GraphML)
    Int(i64),
    /// Floating point (`float`/`double` in GraphML)
    Float(f64),
    /// Boolean
    Bool(bool),
}

impl AttrValue {
    /// Borrow the value as text if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Attribute map of a single node, ordered by key.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Build an attribute map holding only a `file` path.
#[must_use]
pub fn file_attrs(path: &str) -> Attributes {
    let mut attrs = Attributes::new();
    attrs.insert(FILE_ATTR.to_string(), AttrValue::from(path));
    attrs
}

// ============================================================================
// Labels
// ============================================================================

/// Display label of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// Rendering of the label is suppressed.
    Hidden,
    /// The label shows this text (the node's file path).
    Shown(String),
}

impl Label {
    /// The attribute string this label serializes to.
    #[must_use]
    pub fn as_attr(&self) -> &str {
        match self {
            Self::Hidden => HIDDEN_LABEL,
            Self::Shown(text) => text,
        }
    }

    /// Parse a serialized label.
    #[must_use]
    pub fn from_attr(value: &str) -> Self {
        if value == HIDDEN_LABEL {
            Self::Hidden
        } else {
            Self::Shown(value.to_string())
        }
    }

    /// Returns `true` for [`Label::Shown`].
    #[must_use]
    pub fn is_shown(&self) -> bool {
        matches!(self, Self::Shown(_))
    }
}

impl From<Label> for AttrValue {
    fn from(label: Label) -> Self {
        match label {
            Label::Hidden => Self::String(HIDDEN_LABEL.to_string()),
            Label::Shown(text) => Self::String(text),
        }
    }
}

// ============================================================================
// Per-node results
// ============================================================================

/// One value per node, indexed by [`NodeIndex`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NodeMap<T>(Vec<T>);

impl<T> NodeMap<T> {
    /// Wrap a vector whose position `i` belongs to `NodeIndex(i)`.
    #[must_use]
    pub fn from_vec(values: Vec<T>) -> Self {
        Self(values)
    }

    /// Value for a node, `None` if the index is out of range.
    #[must_use]
    pub fn get(&self, node: NodeIndex) -> Option<&T> {
        self.0.get(node.0)
    }

    /// Number of entries (equals the graph's node count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a map of an empty graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(node, value)` pairs in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (NodeIndex, &T)> {
        self.0.iter().enumerate().map(|(i, v)| (NodeIndex(i), v))
    }

    /// Iterate values in index order.
    pub fn values(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Unwrap into the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Index<NodeIndex> for NodeMap<T> {
    type Output = T;

    fn index(&self, node: NodeIndex) -> &T {
        &self.0[node.0]
    }
}

/// A node together with the value it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ranked<T> {
    /// The ranked node.
    pub node: NodeIndex,
    /// Its score.
    pub value: T,
}
