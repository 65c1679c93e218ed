//! Error types for the draft parser.
//!
//! Every variant is fatal to the parse invocation that raised it: the
//! pipeline has no partial-success mode.

use thiserror::Error;

/// Main error type for the draft parser library.
#[derive(Debug, Error)]
pub enum DraftParseError {
    /// The XML text is not well-formed.
    #[error("XML parsing failed: {0}")]
    Tokenization(#[from] roxmltree::Error),

    /// A sub-parser received a node shape it cannot interpret.
    #[error("Cannot interpret <{name}> at {path}: {reason}")]
    SubParser {
        name: String,
        path: String,
        reason: String,
    },

    /// Two attribute values with the same name under one element.
    #[error("Duplicate attribute '{name}' on <{element}>")]
    DuplicateAttribute { element: String, name: String },

    /// The tree violates a structural invariant of the draft format.
    #[error("Structural invariant violated: {0}")]
    StructuralInvariant(String),

    /// The document nests deeper than the configured limit.
    #[error("Document nesting depth exceeds the limit of {limit} (reached {depth})")]
    TooDeep { depth: usize, limit: usize },

    /// Invalid parse options.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

impl DraftParseError {
    /// Build a sub-parser error for the node `name` at `path`.
    pub fn sub_parser(name: &str, path: &str, reason: impl Into<String>) -> Self {
        Self::SubParser {
            name: name.to_string(),
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Build a structural invariant error.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::StructuralInvariant(message.into())
    }
}

/// Result type alias for draft parser operations.
pub type Result<T> = std::result::Result<T, DraftParseError>;
