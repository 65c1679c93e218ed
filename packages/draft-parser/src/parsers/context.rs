//! Context passed to sub-parsers.

use crate::error::DraftParseError;
use crate::tree::Node;

/// Location of the element being interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubParserContext {
    /// Element name being parsed.
    pub name: String,

    /// Slash-separated element names from the document element down to
    /// (and including) the element being parsed.
    pub path: String,
}

impl SubParserContext {
    /// Create a context for the element `name` at `path`.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Error for the element this context describes.
    #[must_use]
    pub fn error(&self, reason: impl Into<String>) -> DraftParseError {
        DraftParseError::sub_parser(&self.name, &self.path, reason)
    }

    /// Error for a child that is not allowed at this position.
    #[must_use]
    pub fn unexpected(&self, child: &Node) -> DraftParseError {
        match child.as_text() {
            Some(text) => self.error(format!("unexpected text '{}'", text.trim())),
            None => self.error(format!("unexpected <{}>", child.name)),
        }
    }

    /// Fetch a required raw attribute of `node`.
    pub fn required_attr<'a>(&self, node: &'a Node, key: &str) -> Result<&'a str, DraftParseError> {
        node.attr(key)
            .ok_or_else(|| self.error(format!("<{}> is missing '{key}'", node.name)))
    }
}
