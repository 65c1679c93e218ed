//! `rubric` sub-parser.
//!
//! ```xml
//! <rubric type="pass-fail" passingAttemptScore="80" passedResult="100" failedResult="0">
//!   <mods>
//!     <mod attemptCondition="[1,2]" reward="5"/>
//!   </mods>
//! </rubric>
//! ```
//!
//! Result parameters are kept as written (numbers coerced); their scoring
//! meaning belongs to whoever consumes the draft.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::{SubParser, SubParserContext};
use crate::error::Result;
use crate::tree::{AttributeValue, Node};
use crate::value::{coerce_attributes, parse_number};

/// Rubric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RubricType {
    #[default]
    Highest,
    PassFail,
}

/// Score modifier applied when an attempt condition matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricMod {
    pub attempt_condition: String,
    pub reward: Number,
}

/// Assessment rubric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rubric {
    #[serde(rename = "type")]
    pub rubric_type: RubricType,
    #[serde(flatten)]
    pub params: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<RubricMod>,
}

fn parse_mod(node: &Node, context: &SubParserContext) -> Result<RubricMod> {
    if node.name != "mod" {
        return Err(context.unexpected(node));
    }
    let attempt_condition = context.required_attr(node, "attemptCondition")?.to_string();
    let raw_reward = context.required_attr(node, "reward")?;
    let reward = parse_number(raw_reward)
        .ok_or_else(|| context.error(format!("mod reward '{raw_reward}' is not a number")))?;

    Ok(RubricMod {
        attempt_condition,
        reward,
    })
}

/// Parser for `<rubric>` elements.
pub struct RubricParser;

impl SubParser for RubricParser {
    fn name(&self) -> &'static str {
        "rubric"
    }

    fn parse(&self, node: Node, context: &SubParserContext) -> Result<AttributeValue> {
        let rubric_type = match node.attr("type") {
            None | Some("highest") => RubricType::Highest,
            Some("pass-fail") => RubricType::PassFail,
            Some(other) => return Err(context.error(format!("unknown rubric type '{other}'"))),
        };
        let params = coerce_attributes(&node.attributes, &["type"]);

        let mut mods = Vec::new();
        for child in node.child_nodes() {
            if child.name != "mods" {
                return Err(context.unexpected(child));
            }
            for entry in child.child_nodes() {
                mods.push(parse_mod(entry, context)?);
            }
        }

        Ok(AttributeValue::Rubric(Rubric {
            rubric_type,
            params,
            mods,
        }))
    }
}
