//! Extension pass: expands authoring shorthands into their full form.
//!
//! - Text shorthand: `<Text>Hello <b>you</b></Text>` becomes
//!   `<Text><textGroup><t>Hello <b>you</b></t></textGroup></Text>` (also
//!   for headings and code blocks). Bare `t` children are kept as lines.
//! - Callout: `<Callout>Note</Callout>` becomes an excerpt wrapping a text
//!   chunk built the same way.
//!
//! Children of HTML chunks are markup and are never expanded.

use super::classify::is_attribute_name;
use crate::config::{HTML_CHUNK, RAW_TEXT_ELEMENT};
use crate::parsers::default_registry;
use crate::tree::{Node, NodeBody};

const TEXT_GROUP: &str = "textGroup";
const CALLOUT: &str = "Callout";
const TEXT_CHUNK: &str = "ObojoboDraft.Chunks.Text";
const EXCERPT_CHUNK: &str = "ObojoboDraft.Chunks.Excerpt";

/// Chunks whose text or `t` children may skip the `textGroup` wrapper.
const TEXT_SHORTHAND_CHUNKS: &[&str] = &[
    TEXT_CHUNK,
    "ObojoboDraft.Chunks.Heading",
    "ObojoboDraft.Chunks.Code",
];

/// Text runs and inline style elements (`b`, `a`, ...). Lowercase
/// elements with a sub-parser, such as `triggers`, are attributes instead.
fn is_inline(node: &Node) -> bool {
    node.is_text()
        || (node.name != RAW_TEXT_ELEMENT
            && is_attribute_name(&node.name)
            && !default_registry().has_parser(&node.name))
}

fn is_line_content(node: &Node) -> bool {
    node.name == RAW_TEXT_ELEMENT || is_inline(node)
}

/// Close a run of adjacent inline nodes into one `t` line. Only the outer
/// edges of the run are trimmed.
fn flush_run(run: &mut Vec<Node>, lines: &mut Vec<Node>) {
    let mut nodes = std::mem::take(run);
    if let Some(NodeBody::Text(text)) = nodes.first_mut().map(|n| &mut n.body) {
        *text = text.trim_start().to_string();
    }
    if let Some(NodeBody::Text(text)) = nodes.last_mut().map(|n| &mut n.body) {
        *text = text.trim_end().to_string();
    }
    nodes.retain(|n| n.as_text() != Some(""));

    if !nodes.is_empty() {
        lines.push(Node::element(RAW_TEXT_ELEMENT).with_children(nodes));
    }
}

/// Move line content into a `textGroup` placed where the first of it was.
/// Returns the children unchanged if there is none or a `textGroup`
/// already exists.
fn group_lines(children: Vec<Node>) -> Vec<Node> {
    if children.iter().any(|c| c.name == TEXT_GROUP) || !children.iter().any(is_line_content) {
        return children;
    }

    let mut lines = Vec::new();
    let mut run = Vec::new();
    let mut rest = Vec::new();
    let mut group_at = None;
    for child in children {
        if is_line_content(&child) {
            group_at.get_or_insert(rest.len());
        }
        if is_inline(&child) {
            run.push(child);
            continue;
        }
        flush_run(&mut run, &mut lines);
        if child.name == RAW_TEXT_ELEMENT {
            lines.push(child);
        } else {
            rest.push(child);
        }
    }
    flush_run(&mut run, &mut lines);

    let group = Node::element(TEXT_GROUP).with_children(lines);
    rest.insert(group_at.unwrap_or(0), group);
    rest
}

fn expand_callout(callout: Node) -> Node {
    let Node {
        attributes, body, ..
    } = callout;
    let children = match body {
        NodeBody::Element { children, .. } => children,
        _ => Vec::new(),
    };

    let text = Node::element(TEXT_CHUNK).with_children(group_lines(children));
    Node {
        name: EXCERPT_CHUNK.to_string(),
        attributes,
        body: NodeBody::Element {
            children: vec![text],
            raw_markup: false,
        },
    }
}

/// Expand every shorthand in the tree.
#[must_use]
pub fn expand_extensions(mut node: Node) -> Node {
    if node.name == HTML_CHUNK {
        return node;
    }

    if let NodeBody::Element { children, .. } = &mut node.body {
        *children = std::mem::take(children)
            .into_iter()
            .map(expand_extensions)
            .collect();
    }

    if node.name == CALLOUT && node.is_element() {
        tracing::debug!("Expanding callout shorthand");
        return expand_callout(node);
    }

    if TEXT_SHORTHAND_CHUNKS.contains(&node.name.as_str()) {
        if let NodeBody::Element { children, .. } = &mut node.body {
            *children = group_lines(std::mem::take(children));
        }
    }
    node
}
