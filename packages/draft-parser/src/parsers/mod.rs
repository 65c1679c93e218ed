//! Sub-parsers for specially named attribute elements.
//!
//! Each sub-parser turns one element (with its already classified
//! children) into a typed [`AttributeValue`]. Sub-parsers are looked up by
//! canonical element name in a [`SubParserRegistry`].

mod context;
mod list_styles;
mod registry;
mod rubric;
mod score_action;
mod solution;
mod text_group;
mod triggers;

pub use context::SubParserContext;
pub use list_styles::{IndentStyle, ListStyles, ListStylesParser, ListType};
pub use registry::{create_default_registry, default_registry, SubParserRegistry};
pub use rubric::{Rubric, RubricMod, RubricParser, RubricType};
pub use score_action::{ScoreAction, ScoreActionParser, ScoreActionsParser};
pub use solution::SolutionParser;
pub use text_group::{StyleRange, StyleType, StyledText, TextGroup, TextGroupParser, TextLine};
pub use triggers::{Trigger, TriggerAction, TriggersParser};

use crate::error::Result;
use crate::tree::{AttributeValue, Node};

/// Trait for sub-parsers.
///
/// A sub-parser receives the element it is registered for, after all of
/// the element's descendants went through the attribute classifier.
pub trait SubParser: Send + Sync {
    /// Canonical element name this parser handles.
    fn name(&self) -> &'static str;

    /// Interpret the element.
    ///
    /// # Errors
    /// Returns `SubParser` when the element has a shape this parser cannot
    /// interpret.
    fn parse(&self, node: Node, context: &SubParserContext) -> Result<AttributeValue>;
}
