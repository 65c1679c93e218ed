//! Draft node builder: turns the merged generic tree into draft nodes.

use std::collections::HashSet;

use serde_json::Value;

use super::ids::IdGenerator;
use super::node::{Content, ContentValue, DraftNode, DraftScoreAction};
use crate::config::{IdPolicy, ParseOptions, HTML_FIELD, ID_ATTRIBUTE, TEXT_FIELD};
use crate::error::{DraftParseError, Result};
use crate::parsers::ScoreAction;
use crate::tree::{AttributeValue, Node, NodeBody};
use crate::value::coerce_scalar;
use crate::xml::to_markup;

/// Builds draft nodes for one parse invocation.
///
/// Tracks every id handed out so duplicates are caught across the whole
/// output tree, including nodes nested in content.
pub struct DraftBuilder<'a> {
    options: &'a ParseOptions,
    ids: &'a mut dyn IdGenerator,
    seen: HashSet<String>,
}

impl<'a> DraftBuilder<'a> {
    #[must_use]
    pub fn new(options: &'a ParseOptions, ids: &'a mut dyn IdGenerator) -> Self {
        Self {
            options,
            ids,
            seen: HashSet::new(),
        }
    }

    /// Build a draft node from a merged structural element.
    ///
    /// # Errors
    /// - `StructuralInvariant` for unnamed or non-element nodes, leftover
    ///   attribute children, or duplicate ids
    /// - `DuplicateAttribute` when text or markup collides with an attribute
    pub fn build(&mut self, node: Node) -> Result<DraftNode> {
        let Node {
            name,
            mut attributes,
            body,
        } = node;

        let (children, raw_markup) = match body {
            NodeBody::Element {
                children,
                raw_markup,
            } => (children, raw_markup),
            NodeBody::Text(_) => {
                return Err(DraftParseError::structural(
                    "text cannot become a draft node",
                ))
            }
            NodeBody::Attribute(_) => {
                return Err(DraftParseError::structural(format!(
                    "attribute <{name}> cannot become a draft node"
                )))
            }
        };
        if name.is_empty() {
            return Err(DraftParseError::structural("element without a type"));
        }

        let id = if self.options.generate_ids {
            let supplied = attributes.shift_remove(ID_ATTRIBUTE);
            Some(self.assign_id(&name, supplied)?)
        } else {
            None
        };

        let mut content = Content::with_capacity(attributes.len());
        for (key, value) in attributes {
            let value = self.convert(value)?;
            content.insert(key, value);
        }

        let mut draft_children = Vec::new();
        if raw_markup {
            insert_reserved(&mut content, &name, HTML_FIELD, to_markup(&children))?;
        } else {
            let mut text = String::new();
            for child in children {
                if child.is_element() {
                    draft_children.push(self.build(child)?);
                } else if let Some(run) = child.as_text() {
                    text.push_str(run);
                } else {
                    return Err(DraftParseError::structural(format!(
                        "attribute <{}> was not merged into <{name}>",
                        child.name
                    )));
                }
            }
            if !text.is_empty() {
                insert_reserved(&mut content, &name, TEXT_FIELD, text)?;
            }
        }

        Ok(DraftNode {
            id,
            node_type: name,
            content,
            children: draft_children,
        })
    }

    fn assign_id(&mut self, name: &str, supplied: Option<AttributeValue>) -> Result<String> {
        let preserved = match (self.options.id_policy, supplied) {
            (IdPolicy::PreserveIfPresent, Some(AttributeValue::Text(id))) if !id.is_empty() => {
                Some(id)
            }
            (IdPolicy::PreserveIfPresent, Some(_)) => {
                tracing::warn!(element = %name, "Ignoring unusable id attribute");
                None
            }
            _ => None,
        };
        let id = preserved.unwrap_or_else(|| self.ids.next_id());

        if !self.seen.insert(id.clone()) {
            return Err(DraftParseError::structural(format!(
                "duplicate node id '{id}' on <{name}>"
            )));
        }
        Ok(id)
    }

    fn convert_score_action(&mut self, action: ScoreAction) -> Result<DraftScoreAction> {
        let page = match action.page {
            Some(page) => Some(Box::new(self.build(*page)?)),
            None => None,
        };
        Ok(DraftScoreAction {
            range: action.range,
            page,
            params: action.params,
        })
    }

    /// Final coercion of an attribute value into draft content.
    fn convert(&mut self, value: AttributeValue) -> Result<ContentValue> {
        let converted = match value {
            AttributeValue::Text(raw) => match coerce_scalar(&raw) {
                Value::Bool(flag) => ContentValue::Bool(flag),
                Value::Number(number) => ContentValue::Number(number),
                _ => ContentValue::Text(raw),
            },
            AttributeValue::TextGroup(group) => ContentValue::TextGroup(group),
            AttributeValue::ScoreAction(action) => {
                ContentValue::ScoreAction(self.convert_score_action(action)?)
            }
            AttributeValue::ScoreActions(actions) => ContentValue::ScoreActions(
                actions
                    .into_iter()
                    .map(|action| self.convert_score_action(action))
                    .collect::<Result<Vec<_>>>()?,
            ),
            AttributeValue::Triggers(triggers) => ContentValue::Triggers(triggers),
            AttributeValue::ListStyles(styles) => ContentValue::ListStyles(styles),
            AttributeValue::Rubric(rubric) => ContentValue::Rubric(rubric),
            AttributeValue::Subtree(node) => ContentValue::Node(Box::new(self.build(*node)?)),
            AttributeValue::Generic(children) => {
                if children.iter().all(Node::is_text) {
                    ContentValue::Text(children.iter().filter_map(Node::as_text).collect())
                } else {
                    ContentValue::Markup(children.iter().map(Node::to_json).collect())
                }
            }
        };
        Ok(converted)
    }
}

/// Insert a builder-owned field, refusing to overwrite an attribute.
fn insert_reserved(content: &mut Content, element: &str, key: &str, value: String) -> Result<()> {
    if content.contains_key(key) {
        return Err(DraftParseError::DuplicateAttribute {
            element: element.to_string(),
            name: key.to_string(),
        });
    }
    content.insert(key.to_string(), ContentValue::Text(value));
    Ok(())
}
