//! `solution` sub-parser: unwraps to its single structural child.

use super::{SubParser, SubParserContext};
use crate::error::Result;
use crate::passes::merge_attributes;
use crate::tree::{AttributeValue, Node};

/// Parser for `<solution>` elements.
pub struct SolutionParser;

impl SubParser for SolutionParser {
    fn name(&self) -> &'static str {
        "solution"
    }

    fn parse(&self, node: Node, context: &SubParserContext) -> Result<AttributeValue> {
        let mut children = node.into_child_nodes().into_iter();
        let child = match (children.next(), children.next()) {
            (Some(child), None) if child.is_element() => child,
            (Some(child), None) => return Err(context.unexpected(&child)),
            (None, _) => return Err(context.error("solution is empty")),
            (Some(_), Some(_)) => {
                return Err(context.error("solution must hold exactly one element"))
            }
        };
        Ok(AttributeValue::Subtree(Box::new(merge_attributes(child)?)))
    }
}
