//! Attribute classifier.
//!
//! Walks the tree bottom-up and decides, per element, whether it is
//! structural content or an attribute value:
//!
//! 1. Elements with a registered sub-parser become the sub-parser's value.
//! 2. Other elements whose name passes [`is_attribute_name`] become a
//!    generic attribute holding their children verbatim.
//! 3. Everything else stays structural.
//!
//! Children of raw-markup elements are not visited.

use crate::error::Result;
use crate::parsers::{SubParserContext, SubParserRegistry};
use crate::tree::{AttributeValue, Node, NodeBody};

/// Naming policy: an element whose name starts with a lowercase letter
/// names an attribute of its parent.
///
/// # Examples
/// ```
/// use draft_parser::passes::is_attribute_name;
///
/// assert!(is_attribute_name("title"));
/// assert!(!is_attribute_name("ObojoboDraft.Pages.Page"));
/// assert!(!is_attribute_name("#text"));
/// ```
#[must_use]
pub fn is_attribute_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_lowercase)
}

/// Classify every element of the tree.
///
/// # Errors
/// Returns `SubParser` when a registered sub-parser rejects its element.
pub fn classify_attributes(node: Node, registry: &SubParserRegistry) -> Result<Node> {
    let mut path = Vec::new();
    classify_node(node, registry, &mut path)
}

fn classify_node(node: Node, registry: &SubParserRegistry, path: &mut Vec<String>) -> Result<Node> {
    let Node {
        name,
        attributes,
        body,
    } = node;

    let (children, raw_markup) = match body {
        NodeBody::Element {
            children,
            raw_markup,
        } => (children, raw_markup),
        body => {
            return Ok(Node {
                name,
                attributes,
                body,
            })
        }
    };

    path.push(name.clone());
    let children = if raw_markup {
        Ok(children)
    } else {
        children
            .into_iter()
            .map(|child| classify_node(child, registry, path))
            .collect::<Result<Vec<_>>>()
    };
    let node_path = path.join("/");
    path.pop();
    let children = children?;

    if let Some(parser) = registry.get(&name) {
        let context = SubParserContext::new(name.clone(), node_path);
        let element = Node {
            name: name.clone(),
            attributes,
            body: NodeBody::Element {
                children,
                raw_markup,
            },
        };
        let value = parser.parse(element, &context)?;
        tracing::trace!(name = %name, path = %context.path, "Sub-parser produced attribute");
        return Ok(Node::attribute(name, value));
    }

    if !raw_markup && is_attribute_name(&name) {
        return Ok(Node {
            name,
            attributes,
            body: NodeBody::Attribute(AttributeValue::Generic(children)),
        });
    }

    Ok(Node {
        name,
        attributes,
        body: NodeBody::Element {
            children,
            raw_markup,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DraftParseError;
    use crate::parsers::default_registry;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_is_attribute_name() {
        assert!(is_attribute_name("listStyles"));
        assert!(is_attribute_name("é"));
        assert!(!is_attribute_name("Page"));
        assert!(!is_attribute_name(""));
        assert!(!is_attribute_name("_private"));
    }

    #[test]
    fn test_lowercase_becomes_generic_attribute() {
        let page = Node::element("Page").with_child(
            Node::element("title").with_child(Node::text("Hello")),
        );
        let classified = classify_attributes(page, default_registry()).unwrap();

        let title = &classified.child_nodes()[0];
        assert_eq!(
            title.attribute_value(),
            Some(&AttributeValue::Generic(vec![Node::text("Hello")]))
        );
        assert!(classified.is_element());
    }

    #[test]
    fn test_nested_special_elements_resolved_first() {
        let triggers = Node::element("triggers").with_child(
            Node::element("trigger")
                .with_attr("type", "onMount")
                .with_child(
                    Node::element("action")
                        .with_attr("type", "nav:goto")
                        .with_attr("value", "{}"),
                ),
        );
        let page = Node::element("Page").with_child(triggers);
        let classified = classify_attributes(page, default_registry()).unwrap();

        let Some(AttributeValue::Triggers(triggers)) = classified.child_nodes()[0].attribute_value()
        else {
            panic!("expected triggers");
        };
        assert_eq!(
            serde_json::to_value(triggers).unwrap(),
            json!([{"type": "onMount", "actions": [{"type": "nav:goto", "value": {}}]}])
        );
    }

    #[test]
    fn test_raw_markup_children_untouched() {
        let mut html = Node::element("ObojoboDraft.Chunks.HTML")
            .with_child(Node::element("p").with_child(Node::text("hi")));
        if let NodeBody::Element { raw_markup, .. } = &mut html.body {
            *raw_markup = true;
        }
        let classified = classify_attributes(html.clone(), default_registry()).unwrap();
        assert_eq!(classified, html);
    }

    #[test]
    fn test_sub_parser_error_carries_path() {
        let doc = Node::element("Doc").with_child(
            Node::element("Page").with_child(
                Node::element("listStyles").with_attr("type", "spiral"),
            ),
        );
        let err = classify_attributes(doc, default_registry()).unwrap_err();
        let DraftParseError::SubParser { name, path, .. } = err else {
            panic!("expected a sub-parser error");
        };
        assert_eq!(name, "listStyles");
        assert_eq!(path, "Doc/Page/listStyles");
    }
}
