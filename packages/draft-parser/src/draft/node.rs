//! Canonical draft node tree.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::parsers::{ListStyles, Rubric, TextGroup, Trigger};

/// Content map of a draft node, in attribute order.
pub type Content = IndexMap<String, ContentValue>;

/// Score action with its page built into a draft node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftScoreAction {
    #[serde(rename = "for")]
    pub range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Box<DraftNode>>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

/// Table cells bundled with the table dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableGrid {
    pub text_group: TextGroup,
    pub num_rows: u64,
    pub num_cols: u64,
}

/// Typed value stored in a draft node's content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentValue {
    Bool(bool),
    Number(Number),
    Text(String),
    TextGroup(TextGroup),
    ScoreAction(DraftScoreAction),
    ScoreActions(Vec<DraftScoreAction>),
    Triggers(Vec<Trigger>),
    ListStyles(ListStyles),
    Rubric(Rubric),
    Table(TableGrid),
    /// Nested draft node, e.g. a question's solution page.
    Node(Box<DraftNode>),
    /// Opaque markup kept in element/text JSON form.
    Markup(Vec<Value>),
}

impl ContentValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(number) => number.as_u64(),
            _ => None,
        }
    }

    /// Draft nodes nested inside this value.
    fn nested(&self) -> Vec<&DraftNode> {
        match self {
            Self::Node(node) => vec![node.as_ref()],
            Self::ScoreAction(action) => action.page.as_deref().into_iter().collect(),
            Self::ScoreActions(actions) => actions
                .iter()
                .filter_map(|action| action.page.as_deref())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Node of the canonical draft tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub node_type: String,
    pub content: Content,
    pub children: Vec<DraftNode>,
}

impl DraftNode {
    /// Create a node with empty content and no children.
    #[must_use]
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            id: None,
            node_type: node_type.into(),
            content: Content::new(),
            children: Vec::new(),
        }
    }

    /// Draft nodes held in this node's content values.
    #[must_use]
    pub fn content_nodes(&self) -> Vec<&DraftNode> {
        self.content.values().flat_map(ContentValue::nested).collect()
    }

    /// Visit this node and every descendant, including nodes nested in
    /// content, depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a DraftNode)) {
        visit(self);
        for nested in self.content_nodes() {
            nested.walk(visit);
        }
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Number of nodes in the tree, including nodes nested in content.
    #[must_use]
    pub fn count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }

    /// Every id present in the tree, in walk order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk(&mut |node| {
            if let Some(id) = node.id.as_deref() {
                ids.push(id);
            }
        });
        ids
    }

    /// First node of the given type, in walk order.
    #[must_use]
    pub fn find_type(&self, node_type: &str) -> Option<&DraftNode> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() && node.node_type == node_type {
                found = Some(node);
            }
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> DraftNode {
        let mut solution = DraftNode::new("Page");
        solution.id = Some("s".into());

        let mut question = DraftNode::new("Question");
        question.id = Some("q".into());
        question
            .content
            .insert("solution".into(), ContentValue::Node(Box::new(solution)));

        let mut root = DraftNode::new("Module");
        root.id = Some("m".into());
        root.content
            .insert("title".into(), ContentValue::Text("Intro".into()));
        root.children.push(question);
        root
    }

    #[test]
    fn test_serialize_shape() {
        let mut node = DraftNode::new("ObojoboDraft.Chunks.Break");
        node.content
            .insert("width".into(), ContentValue::Text("normal".into()));
        node.content
            .insert("visible".into(), ContentValue::Bool(true));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "ObojoboDraft.Chunks.Break",
                "content": {"width": "normal", "visible": true},
                "children": [],
            })
        );
    }

    #[test]
    fn test_walk_includes_content_nodes() {
        let root = sample();
        assert_eq!(root.count(), 3);
        assert_eq!(root.ids(), vec!["m", "q", "s"]);
        assert!(root.find_type("Page").is_some());
        assert!(root.find_type("Table").is_none());
    }

    #[test]
    fn test_table_grid_shape() {
        let grid = ContentValue::Table(TableGrid {
            text_group: TextGroup::default(),
            num_rows: 2,
            num_cols: 3,
        });
        assert_eq!(
            serde_json::to_value(&grid).unwrap(),
            json!({"textGroup": [], "numRows": 2, "numCols": 3})
        );
    }
}
