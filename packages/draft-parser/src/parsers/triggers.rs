//! `triggers` sub-parser.
//!
//! ```xml
//! <triggers>
//!   <trigger type="onMount">
//!     <actions>
//!       <action type="nav:goto"><value id="page-2"/></action>
//!     </actions>
//!   </trigger>
//! </triggers>
//! ```
//!
//! Actions may also sit directly under `trigger`, and an action's value may
//! be given as a JSON `value` attribute instead of a `value` child.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{SubParser, SubParserContext};
use crate::error::Result;
use crate::tree::{AttributeValue, Node};
use crate::value::coerce_attributes;

/// One action run when a trigger fires.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub value: Value,
}

/// Event binding: an event type and the actions it runs, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub event_type: String,
    pub actions: Vec<TriggerAction>,
}

fn parse_action(action: &Node, context: &SubParserContext) -> Result<TriggerAction> {
    let action_type = context.required_attr(action, "type")?.to_string();

    let value = if let Some(raw) = action.attr("value") {
        serde_json::from_str(raw).map_err(|e| {
            context.error(format!(
                "action '{action_type}' has an invalid JSON value: {e}"
            ))
        })?
    } else {
        let mut value = Value::Object(Map::new());
        for child in action.child_nodes() {
            if child.name != "value" {
                return Err(context.unexpected(child));
            }
            value = Value::Object(coerce_attributes(&child.attributes, &[]));
        }
        value
    };

    Ok(TriggerAction { action_type, value })
}

fn parse_trigger(trigger: &Node, context: &SubParserContext) -> Result<Trigger> {
    let event_type = context.required_attr(trigger, "type")?.to_string();

    let mut actions = Vec::new();
    for child in trigger.child_nodes() {
        match child.name.as_str() {
            "action" => actions.push(parse_action(child, context)?),
            "actions" => {
                for action in child.child_nodes() {
                    if action.name != "action" {
                        return Err(context.unexpected(action));
                    }
                    actions.push(parse_action(action, context)?);
                }
            }
            _ => return Err(context.unexpected(child)),
        }
    }

    Ok(Trigger {
        event_type,
        actions,
    })
}

/// Parser for `<triggers>` elements.
pub struct TriggersParser;

impl SubParser for TriggersParser {
    fn name(&self) -> &'static str {
        "triggers"
    }

    fn parse(&self, node: Node, context: &SubParserContext) -> Result<AttributeValue> {
        node.child_nodes()
            .iter()
            .map(|child| {
                if child.name == "trigger" {
                    parse_trigger(child, context)
                } else {
                    Err(context.unexpected(child))
                }
            })
            .collect::<Result<Vec<_>>>()
            .map(AttributeValue::Triggers)
    }
}
