//! Error types for incgraph operations.
//!
//! Errors fall into two groups:
//!
//! - **Load errors**: the input graph cannot be read or is structurally
//!   invalid (unreadable file, bad GraphML, dangling edge, duplicate node id,
//!   undirected graph). These are fatal and abort a run before any analysis.
//! - **Configuration errors**: the analysis configuration file is unreadable
//!   or holds invalid values.
//!
//! Conditions that are *not* errors live in result structures instead: an
//! empty graph yields empty results, and a tripped cycle-enumeration guard is
//! recorded in [`CycleCount`](crate::CycleCount).

use thiserror::Error;

/// Result type for incgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for incgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The GraphML input could not be read, parsed or written
    #[error("GraphML error: {0}")]
    GraphMl(#[from] incgraph_graphml::Error),

    /// Two nodes share the same id
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    /// An edge references a node that does not exist
    #[error("edge '{from}' -> '{to}' references missing node '{missing}'")]
    DanglingEdge {
        /// Source id as written in the input
        from: String,
        /// Target id as written in the input
        to: String,
        /// The endpoint that is absent
        missing: String,
    },

    /// The input graph is declared undirected
    #[error("graph is undirected; include graphs must use edgedefault=\"directed\"")]
    UndirectedGraph,

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if this error means the input graph could not be loaded.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::GraphMl(_)
                | Self::DuplicateNode(_)
                | Self::DanglingEdge { .. }
                | Self::UndirectedGraph
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_categorization() {
        assert!(Error::DuplicateNode("a".to_string()).is_load_error());
        assert!(Error::UndirectedGraph.is_load_error());
        assert!(
            Error::DanglingEdge {
                from: "a".to_string(),
                to: "b".to_string(),
                missing: "b".to_string(),
            }
            .is_load_error()
        );
        assert!(!Error::Config("bad".to_string()).is_load_error());
    }

    #[test]
    fn dangling_edge_display_names_missing_endpoint() {
        let error = Error::DanglingEdge {
            from: "base/a.h".to_string(),
            to: "base/gone.h".to_string(),
            missing: "base/gone.h".to_string(),
        };

        let display = error.to_string();
        assert!(display.contains("'base/a.h' -> 'base/gone.h'"));
        assert!(display.contains("missing node 'base/gone.h'"));
    }
}
