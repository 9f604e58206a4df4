//! GraphML reading and writing for include-graph analysis.
//!
//! This library covers the GraphML subset produced by include-graph
//! extractors and consumed by Gephi or networkx: typed node/edge keys, a
//! single directed graph, nodes and edges with `<data>` values. Values stay
//! raw strings in the [`GraphDocument`] model; typing is up to the consumer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod model;
pub mod reader;
pub mod warning;
pub mod writer;

pub use atomic::write_graphml_atomic;
pub use error::{Error, Result};
pub use model::{AttrType, DataEntry, EdgeRecord, GraphDocument, KeyDecl, KeyDomain, NodeRecord};
pub use reader::{GraphMlReader, ReadOutcome};
pub use warning::Warning;
pub use writer::{GRAPHML_NS, GraphMlWriter};
