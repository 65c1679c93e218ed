//! `scoreAction` and `scoreActions` sub-parsers.
//!
//! ```xml
//! <scoreActions>
//!   <scoreAction for="[0,100)"><Page>...</Page></scoreAction>
//!   <scoreAction for="100"><Page>...</Page></scoreAction>
//! </scoreActions>
//! ```

use serde_json::{Map, Value};

use super::{SubParser, SubParserContext};
use crate::error::Result;
use crate::passes::merge_attributes;
use crate::tree::{AttributeValue, Node, NodeBody};
use crate::value::coerce_attributes;

/// Score action before its page is built into a draft node.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreAction {
    /// Score range the action applies to, e.g. `[0,100)`.
    pub range: String,

    /// Page shown when the score falls in `range`, attributes merged.
    pub page: Option<Box<Node>>,

    /// Remaining attributes.
    pub params: Map<String, Value>,
}

fn parse_score_action(node: Node, context: &SubParserContext) -> Result<ScoreAction> {
    let range = context.required_attr(&node, "for")?.to_string();
    let params = coerce_attributes(&node.attributes, &["for"]);

    let mut page = None;
    for child in node.into_child_nodes() {
        if !child.is_element() {
            return Err(context.unexpected(&child));
        }
        if page.is_some() {
            return Err(context.error("a score action holds at most one page"));
        }
        page = Some(Box::new(merge_attributes(child)?));
    }

    Ok(ScoreAction {
        range,
        page,
        params,
    })
}

/// Parser for `<scoreAction>` elements.
pub struct ScoreActionParser;

impl SubParser for ScoreActionParser {
    fn name(&self) -> &'static str {
        "scoreAction"
    }

    fn parse(&self, node: Node, context: &SubParserContext) -> Result<AttributeValue> {
        parse_score_action(node, context).map(AttributeValue::ScoreAction)
    }
}

/// Parser for `<scoreActions>` elements.
///
/// Children were already turned into score actions by
/// [`ScoreActionParser`], since the classifier works bottom-up.
pub struct ScoreActionsParser;

impl SubParser for ScoreActionsParser {
    fn name(&self) -> &'static str {
        "scoreActions"
    }

    fn parse(&self, node: Node, context: &SubParserContext) -> Result<AttributeValue> {
        let mut actions = Vec::new();
        for child in node.into_child_nodes() {
            match child.body {
                NodeBody::Attribute(AttributeValue::ScoreAction(action)) => actions.push(action),
                body => {
                    return Err(context.unexpected(&Node {
                        name: child.name,
                        attributes: child.attributes,
                        body,
                    }))
                }
            }
        }
        Ok(AttributeValue::ScoreActions(actions))
    }
}
