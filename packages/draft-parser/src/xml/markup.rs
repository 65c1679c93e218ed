//! Serialization of generic nodes back into markup text.
//!
//! Used for literal-HTML containers, whose children are stored as a single
//! markup string rather than interpreted.

use crate::tree::{AttributeValue, Node};

/// Escape character data.
///
/// # Examples
/// ```
/// use draft_parser::xml::escape_text;
///
/// assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
/// ```
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for use inside double quotes.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Serialize nodes to markup in document order.
#[must_use]
pub fn to_markup(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    if let Some(text) = node.as_text() {
        out.push_str(&escape_text(text));
        return;
    }

    out.push('<');
    out.push_str(&node.name);
    for (key, value) in &node.attributes {
        if let AttributeValue::Text(raw) = value {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_attribute(raw));
            out.push('"');
        }
    }

    let children = node.child_nodes();
    if children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&node.name);
    out.push('>');
}
