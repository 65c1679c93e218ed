//! Conversion of raw XML text into the generic tree.
//!
//! roxmltree does the lexing and well-formedness checks. This module only
//! copies its document into owned [`Node`]s, dropping comments and
//! processing instructions. roxmltree builds its document recursively, so
//! the nesting limit is enforced first by a streaming quick-xml scan that
//! never recurses.

use quick_xml::events::Event;
use quick_xml::Reader;
use roxmltree::Document;

use crate::error::{DraftParseError, Result};
use crate::tree::{AttributeValue, Node, NodeBody};

/// Parse XML text and return the document element as a generic node.
///
/// # Errors
/// - `TooDeep` if elements nest deeper than `max_depth`
/// - `Tokenization` if the XML is not well-formed
///
/// # Examples
/// ```
/// use draft_parser::xml::tokenize;
///
/// let root = tokenize("<Doc><Page title=\"A\"/></Doc>", 16).unwrap();
/// assert_eq!(root.name, "Doc");
/// assert_eq!(root.child_nodes()[0].attr("title"), Some("A"));
/// ```
pub fn tokenize(xml: &str, max_depth: usize) -> Result<Node> {
    check_depth(xml, max_depth)?;
    let doc = Document::parse(xml)?;
    Ok(convert_element(doc.root_element()))
}

/// Reject documents nested deeper than `max_depth` without building a tree.
///
/// Lexical errors end the scan early; roxmltree reports them afterwards.
pub fn check_depth(xml: &str, max_depth: usize) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;

    loop {
        let opened = match reader.read_event() {
            Ok(Event::Start(_)) => {
                depth += 1;
                depth
            }
            Ok(Event::Empty(_)) => depth + 1,
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                continue;
            }
            Ok(Event::Eof) | Err(_) => return Ok(()),
            Ok(_) => continue,
        };

        if opened > max_depth {
            return Err(DraftParseError::TooDeep {
                depth: opened,
                limit: max_depth,
            });
        }
    }
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Node {
    let attributes = node
        .attributes()
        .map(|attr| {
            (
                attr.name().to_string(),
                AttributeValue::Text(attr.value().to_string()),
            )
        })
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(convert_element(child));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                children.push(Node::text(text));
            }
        }
    }

    Node {
        name: node.tag_name().name().to_string(),
        attributes,
        body: NodeBody::Element {
            children,
            raw_markup: false,
        },
    }
}
