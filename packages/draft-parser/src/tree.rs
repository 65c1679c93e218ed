//! Generic intermediate tree shared by all passes before the draft builder.
//!
//! A [`Node`] is either a structural element, a text run, or an attribute
//! value produced by the attribute classifier. Passes take nodes by value
//! and return new nodes, so each stage can be tested in isolation.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::config::TEXT_NODE_NAME;
use crate::parsers::{ListStyles, Rubric, ScoreAction, TextGroup, Trigger};

/// Attribute map of a node, in document order.
pub type Attributes = IndexMap<String, AttributeValue>;

/// Value held by an attribute, either raw from the XML or computed by a
/// sub-parser.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Raw string, as written in the XML or collapsed from a single text child.
    Text(String),
    /// Styled text lines.
    TextGroup(TextGroup),
    /// A single score action.
    ScoreAction(ScoreAction),
    /// A list of score actions.
    ScoreActions(Vec<ScoreAction>),
    /// Event bindings.
    Triggers(Vec<Trigger>),
    /// Per-indent list styling.
    ListStyles(ListStyles),
    /// Assessment rubric.
    Rubric(Rubric),
    /// A structural subtree that becomes a nested draft node.
    Subtree(Box<Node>),
    /// Children taken verbatim.
    Generic(Vec<Node>),
}

/// Body of a generic node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeBody {
    /// Structural element with ordered children.
    Element {
        children: Vec<Node>,
        /// Children are literal markup and must not be reinterpreted.
        raw_markup: bool,
    },
    /// Character data.
    Text(String),
    /// Classified attribute; terminal for every later pass.
    Attribute(AttributeValue),
}

/// Node of the generic tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub attributes: Attributes,
    pub body: NodeBody,
}

impl Node {
    /// Create an element with no attributes and no children.
    #[must_use]
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            body: NodeBody::Element {
                children: Vec::new(),
                raw_markup: false,
            },
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            name: TEXT_NODE_NAME.to_string(),
            attributes: Attributes::new(),
            body: NodeBody::Text(text.into()),
        }
    }

    /// Create an attribute node.
    #[must_use]
    pub fn attribute(name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            body: NodeBody::Attribute(value),
        }
    }

    /// Add a raw string attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(key.into(), AttributeValue::Text(value.into()));
        self
    }

    /// Append a child. Has no effect on text or attribute nodes.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        if let NodeBody::Element { children, .. } = &mut self.body {
            children.push(child);
        }
        self
    }

    /// Replace the children of an element.
    #[must_use]
    pub fn with_children(mut self, new_children: Vec<Node>) -> Self {
        if let NodeBody::Element { children, .. } = &mut self.body {
            *children = new_children;
        }
        self
    }

    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self.body, NodeBody::Element { .. })
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.body, NodeBody::Text(_))
    }

    #[must_use]
    pub fn is_attribute(&self) -> bool {
        matches!(self.body, NodeBody::Attribute(_))
    }

    #[must_use]
    pub fn is_raw_markup(&self) -> bool {
        matches!(self.body, NodeBody::Element { raw_markup: true, .. })
    }

    /// Text of a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            NodeBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Computed value of an attribute node.
    #[must_use]
    pub fn attribute_value(&self) -> Option<&AttributeValue> {
        match &self.body {
            NodeBody::Attribute(value) => Some(value),
            _ => None,
        }
    }

    /// Raw string attribute by key.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self.attributes.get(key) {
            Some(AttributeValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Children of an element, or the verbatim children of a generic
    /// attribute value.
    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        match &self.body {
            NodeBody::Element { children, .. } => children,
            NodeBody::Attribute(AttributeValue::Generic(children)) => children,
            _ => &[],
        }
    }

    /// Take ownership of the children, as [`Node::child_nodes`] would see them.
    #[must_use]
    pub fn into_child_nodes(self) -> Vec<Node> {
        match self.body {
            NodeBody::Element { children, .. } => children,
            NodeBody::Attribute(AttributeValue::Generic(children)) => children,
            _ => Vec::new(),
        }
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = self.as_text() {
            out.push_str(text);
            return;
        }
        for child in self.child_nodes() {
            child.collect_text(out);
        }
    }

    /// Number of nodes in this subtree, including attribute-held children.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.child_nodes().iter().map(Node::count).sum::<usize>()
    }

    /// Nesting depth of this subtree (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .child_nodes()
            .iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }

    /// Render this node in the element/text JSON shape used for opaque
    /// generic values.
    #[must_use]
    pub fn to_json(&self) -> Value {
        if let Some(text) = self.as_text() {
            return json!({ "type": "text", "text": text });
        }
        let attributes: Map<String, Value> = self
            .attributes
            .iter()
            .filter_map(|(key, value)| match value {
                AttributeValue::Text(text) => Some((key.clone(), Value::String(text.clone()))),
                _ => None,
            })
            .collect();
        let elements: Vec<Value> = self.child_nodes().iter().map(Node::to_json).collect();
        json!({
            "type": "element",
            "name": self.name,
            "attributes": attributes,
            "elements": elements,
        })
    }
}
