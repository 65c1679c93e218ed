//! HTML passthrough pass.

use crate::config::HTML_CHUNK;
use crate::tree::{Node, NodeBody};

/// Flag literal-HTML containers so their children are kept as raw markup.
#[must_use]
pub fn mark_html(mut node: Node) -> Node {
    if let NodeBody::Element {
        children,
        raw_markup,
    } = &mut node.body
    {
        if node.name == HTML_CHUNK {
            *raw_markup = true;
        } else {
            *children = std::mem::take(children).into_iter().map(mark_html).collect();
        }
    }
    node
}
