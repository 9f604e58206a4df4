//! Warning types for non-fatal issues found while reading GraphML.
//!
//! GraphML producers vary a lot. Rather than rejecting a document over an
//! element we do not use, the reader records a [`Warning`] and keeps going.
//! Structural problems that would make the graph wrong (an edge without a
//! target, a `<data>` element outside any owner) are still hard errors.
//!
//! # Examples
//!
//! ```
//! use incgraph_graphml::warning::Warning;
//!
//! let warning = Warning::UndeclaredKey {
//!     position: 120,
//!     key: "d7".to_string(),
//! };
//! assert_eq!(warning.kind(), "undeclared_key");
//! assert!(warning.description().contains("d7"));
//! ```

/// A non-fatal issue that occurred during GraphML reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A `<data>` element referenced a key that was never declared.
    ///
    /// The entry is kept; consumers decode it as a string.
    UndeclaredKey {
        /// Byte offset of the element.
        position: u64,
        /// The referenced key id.
        key: String,
    },

    /// An element was skipped because it is outside the supported subset
    /// (nested graphs, hyperedges, ports, unknown key domains).
    SkippedElement {
        /// Byte offset of the element.
        position: u64,
        /// Element name.
        element: String,
        /// Why it was skipped.
        reason: String,
    },
}

impl Warning {
    /// Returns the byte offset associated with this warning.
    #[must_use]
    pub fn position(&self) -> u64 {
        match self {
            Self::UndeclaredKey { position, .. } | Self::SkippedElement { position, .. } => {
                *position
            }
        }
    }

    /// Returns a human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::UndeclaredKey { position, key } => {
                format!("byte {position}: data references undeclared key '{key}'")
            }
            Self::SkippedElement {
                position,
                element,
                reason,
            } => format!("byte {position}: skipped <{element}>: {reason}"),
        }
    }

    /// Returns a static string identifying the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UndeclaredKey { .. } => "undeclared_key",
            Self::SkippedElement { .. } => "skipped_element",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_element_description_names_element_and_reason() {
        let warning = Warning::SkippedElement {
            position: 42,
            element: "hyperedge".to_string(),
            reason: "hyperedges are not supported".to_string(),
        };

        assert_eq!(warning.position(), 42);
        assert_eq!(warning.kind(), "skipped_element");
        let text = warning.to_string();
        assert!(text.contains("<hyperedge>"));
        assert!(text.contains("not supported"));
    }
}
