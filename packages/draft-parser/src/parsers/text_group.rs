//! `textGroup` sub-parser.
//!
//! A text group is a list of `t` lines. Inline elements inside a line
//! (`b`, `i`, `a`, ...) are flattened into the line's text, and each one
//! leaves a style range over the characters it covered.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{SubParser, SubParserContext};
use crate::config::RAW_TEXT_ELEMENT;
use crate::error::Result;
use crate::tree::{AttributeValue, Node};
use crate::value::coerce_attributes;

/// Inline style kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StyleType {
    #[serde(rename = "b")]
    Bold,
    #[serde(rename = "i")]
    Italic,
    #[serde(rename = "del")]
    Strikethrough,
    #[serde(rename = "q")]
    Quote,
    #[serde(rename = "a")]
    Link,
    #[serde(rename = "monospace")]
    Monospace,
    #[serde(rename = "sup")]
    Superscript,
    #[serde(rename = "_latex")]
    Latex,
}

/// Style range over `[start, end)` character offsets of a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRange {
    #[serde(rename = "type")]
    pub kind: StyleType,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Text of one line with its styles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledText {
    pub value: String,
    #[serde(rename = "styleList")]
    pub style_list: Vec<StyleRange>,
}

/// One line of a text group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: StyledText,
    /// Line-level metadata such as `indent` or `align`.
    pub data: Map<String, Value>,
}

/// Ordered lines of styled text.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TextGroup(pub Vec<TextLine>);

impl TextGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Map an inline element name to its style and style data.
fn style_for(node: &Node) -> Option<(StyleType, Option<Value>)> {
    let style = match node.name.as_str() {
        "b" => (StyleType::Bold, None),
        "i" => (StyleType::Italic, None),
        "del" => (StyleType::Strikethrough, None),
        "q" => (StyleType::Quote, None),
        "a" => (
            StyleType::Link,
            Some(Value::Object(coerce_attributes(&node.attributes, &[]))),
        ),
        "code" => (StyleType::Monospace, None),
        "sup" => (StyleType::Superscript, Some(json!(1))),
        "sub" => (StyleType::Superscript, Some(json!(-1))),
        "latex" => (StyleType::Latex, None),
        _ => return None,
    };
    Some(style)
}

/// Accumulates the flattened text and styles of one line.
#[derive(Default)]
struct LineBuilder {
    value: String,
    chars: usize,
    styles: Vec<StyleRange>,
}

impl LineBuilder {
    fn push_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            if let Some(text) = node.as_text() {
                self.value.push_str(text);
                self.chars += text.chars().count();
                continue;
            }

            let start = self.chars;
            self.push_nodes(node.child_nodes());
            let end = self.chars;

            match style_for(node) {
                Some((kind, data)) => self.styles.push(StyleRange {
                    kind,
                    start,
                    end,
                    data,
                }),
                None => tracing::warn!(
                    element = %node.name,
                    "Unknown inline style element, keeping its text only"
                ),
            }
        }
    }

    fn finish(self, data: Map<String, Value>) -> TextLine {
        TextLine {
            text: StyledText {
                value: self.value,
                style_list: self.styles,
            },
            data,
        }
    }
}

/// Parse a single `t` line.
fn parse_line(line: &Node) -> TextLine {
    let mut builder = LineBuilder::default();
    builder.push_nodes(line.child_nodes());
    builder.finish(coerce_attributes(&line.attributes, &[]))
}

/// Parser for `<textGroup>` elements.
pub struct TextGroupParser;

impl SubParser for TextGroupParser {
    fn name(&self) -> &'static str {
        "textGroup"
    }

    fn parse(&self, node: Node, context: &SubParserContext) -> Result<AttributeValue> {
        let mut lines = Vec::new();
        for child in node.child_nodes() {
            if child.is_text() || child.name != RAW_TEXT_ELEMENT {
                return Err(context.unexpected(child));
            }
            lines.push(parse_line(child));
        }
        Ok(AttributeValue::TextGroup(TextGroup(lines)))
    }
}
