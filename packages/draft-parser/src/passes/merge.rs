//! Attribute merger: folds classified attribute children into their
//! parent's attribute map.

use crate::error::{DraftParseError, Result};
use crate::tree::{AttributeValue, Node, NodeBody};

/// Collapse a generic value made of a single text run (or nothing) to text.
fn collapse(value: AttributeValue) -> AttributeValue {
    match value {
        AttributeValue::Generic(children) if children.is_empty() => {
            AttributeValue::Text(String::new())
        }
        AttributeValue::Generic(mut children)
            if children.len() == 1 && children[0].is_text() =>
        {
            match children.pop().map(|child| child.body) {
                Some(NodeBody::Text(text)) => AttributeValue::Text(text),
                _ => AttributeValue::Generic(children),
            }
        }
        other => other,
    }
}

/// Merge attribute children into the attribute map of every element.
///
/// Structural children keep their order. Raw-markup elements and attribute
/// values are left alone.
///
/// # Errors
/// Returns `DuplicateAttribute` when an element ends up with two
/// attributes of the same name.
pub fn merge_attributes(node: Node) -> Result<Node> {
    let Node {
        name,
        mut attributes,
        body,
    } = node;

    let children = match body {
        NodeBody::Element {
            children,
            raw_markup: false,
        } => children,
        body => {
            return Ok(Node {
                name,
                attributes,
                body,
            })
        }
    };

    let mut structural = Vec::with_capacity(children.len());
    for child in children {
        match child.body {
            NodeBody::Attribute(value) => {
                if attributes.contains_key(&child.name) {
                    return Err(DraftParseError::DuplicateAttribute {
                        element: name,
                        name: child.name,
                    });
                }
                if matches!(value, AttributeValue::Generic(_)) && !child.attributes.is_empty() {
                    tracing::warn!(
                        element = %name,
                        attribute = %child.name,
                        "Dropping XML attributes of an attribute element"
                    );
                }
                attributes.insert(child.name, collapse(value));
            }
            body => structural.push(merge_attributes(Node {
                name: child.name,
                attributes: child.attributes,
                body,
            })?),
        }
    }

    Ok(Node {
        name,
        attributes,
        body: NodeBody::Element {
            children: structural,
            raw_markup: false,
        },
    })
}
