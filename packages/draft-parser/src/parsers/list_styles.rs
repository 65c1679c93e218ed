//! `listStyles` sub-parser.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{SubParser, SubParserContext};
use crate::error::Result;
use crate::tree::{AttributeValue, Node};

/// Ordered or unordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Ordered,
    #[default]
    Unordered,
}

impl ListType {
    fn parse(raw: &str, context: &SubParserContext) -> Result<Self> {
        match raw {
            "ordered" => Ok(Self::Ordered),
            "unordered" => Ok(Self::Unordered),
            _ => Err(context.error(format!("unknown list type '{raw}'"))),
        }
    }
}

/// Style overrides for one indent level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndentStyle {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub list_type: Option<ListType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
}

/// List type plus per-level overrides keyed by indent level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ListStyles {
    #[serde(rename = "type")]
    pub list_type: ListType,
    pub indents: BTreeMap<u32, IndentStyle>,
}

fn parse_indent(indent: &Node, context: &SubParserContext) -> Result<(u32, IndentStyle)> {
    let raw_level = context.required_attr(indent, "level")?;
    let level = raw_level
        .parse::<u32>()
        .map_err(|_| context.error(format!("indent level '{raw_level}' is not a number")))?;

    let list_type = indent
        .attr("type")
        .map(|raw| ListType::parse(raw, context))
        .transpose()?;

    let start = indent
        .attr("start")
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| context.error(format!("indent start '{raw}' is not a number")))
        })
        .transpose()?;

    Ok((
        level,
        IndentStyle {
            list_type,
            bullet_style: indent.attr("bulletStyle").map(str::to_string),
            start,
        },
    ))
}

/// Parser for `<listStyles>` elements.
///
/// `indent` elements may appear directly or inside an `indents` wrapper.
pub struct ListStylesParser;

impl SubParser for ListStylesParser {
    fn name(&self) -> &'static str {
        "listStyles"
    }

    fn parse(&self, node: Node, context: &SubParserContext) -> Result<AttributeValue> {
        let list_type = node
            .attr("type")
            .map(|raw| ListType::parse(raw, context))
            .transpose()?
            .unwrap_or_default();

        let mut indent_nodes = Vec::new();
        for child in node.child_nodes() {
            match child.name.as_str() {
                "indent" => indent_nodes.push(child),
                "indents" => indent_nodes.extend(child.child_nodes()),
                _ => return Err(context.unexpected(child)),
            }
        }

        let mut indents = BTreeMap::new();
        for indent in indent_nodes {
            if indent.name != "indent" {
                return Err(context.unexpected(indent));
            }
            let (level, style) = parse_indent(indent, context)?;
            if indents.insert(level, style).is_some() {
                return Err(context.error(format!("indent level {level} is defined twice")));
            }
        }

        Ok(AttributeValue::ListStyles(ListStyles { list_type, indents }))
    }
}
