//! Error types for incgraph-graphml operations.

use std::io;
use thiserror::Error;

/// The error type for GraphML reading and writing.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The XML itself could not be parsed.
    #[error("XML error at byte {position}: {source}")]
    Xml {
        /// Byte offset reported by the XML reader.
        position: u64,
        /// Underlying parser error.
        source: quick_xml::Error,
    },

    /// An element attribute could not be decoded.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Well-formed XML that is not valid GraphML for our purposes.
    #[error("Invalid GraphML: {0}")]
    InvalidFormat(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }
}

/// A specialized Result type for incgraph-graphml operations.
pub type Result<T> = std::result::Result<T, Error>;
