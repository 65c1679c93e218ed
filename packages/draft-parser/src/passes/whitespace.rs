//! Whitespace filter.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::RAW_TEXT_ELEMENT;
use crate::tree::{Node, NodeBody};

/// Text made only of spaces, tabs and line breaks.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\r\n\t ]+$").expect("valid regex"));

/// Check whether text is whitespace only.
#[must_use]
pub fn is_whitespace(text: &str) -> bool {
    WHITESPACE_PATTERN.is_match(text)
}

/// Remove whitespace-only text children everywhere except below the
/// raw-text element, whose content is kept verbatim.
///
/// # Examples
/// ```
/// use draft_parser::passes::filter_whitespace;
/// use draft_parser::xml::tokenize;
///
/// let root = tokenize("<a>\n  <b/>\n  <t> </t>\n</a>", 8).unwrap();
/// let filtered = filter_whitespace(root);
/// assert_eq!(filtered.child_nodes().len(), 2);
/// assert_eq!(filtered.child_nodes()[1].child_nodes().len(), 1);
/// ```
#[must_use]
pub fn filter_whitespace(mut node: Node) -> Node {
    if node.name == RAW_TEXT_ELEMENT {
        return node;
    }

    if let NodeBody::Element { children, .. } = &mut node.body {
        *children = std::mem::take(children)
            .into_iter()
            .filter(|child| !child.as_text().is_some_and(is_whitespace))
            .map(filter_whitespace)
            .collect();
    }
    node
}
