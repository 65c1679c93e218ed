//! Final structural pass: type-specific repackaging of built draft nodes.
//!
//! Fixups are keyed by draft type and run on every matching node of the
//! tree, including nodes nested in content.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::node::{ContentValue, DraftNode, DraftScoreAction, TableGrid};
use crate::config::TABLE_CHUNK;
use crate::error::{DraftParseError, Result};

/// Repackaging rule for one draft type.
pub type Fixup = fn(DraftNode) -> Result<DraftNode>;

/// Registry mapping draft types to fixups.
pub struct FixupRegistry {
    fixups: HashMap<&'static str, Fixup>,
}

impl FixupRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fixups: HashMap::new(),
        }
    }

    /// Register a fixup for a draft type.
    pub fn register(&mut self, node_type: &'static str, fixup: Fixup) {
        self.fixups.insert(node_type, fixup);
    }

    /// Check if a fixup is registered for a draft type.
    #[must_use]
    pub fn has_fixup(&self, node_type: &str) -> bool {
        self.fixups.contains_key(node_type)
    }

    /// Return set of all draft types with a fixup.
    #[must_use]
    pub fn registered_types(&self) -> HashSet<&str> {
        self.fixups.keys().copied().collect()
    }

    /// Apply the registered fixups to the whole tree.
    ///
    /// # Errors
    /// Propagates the first fixup failure.
    pub fn apply(&self, node: DraftNode) -> Result<DraftNode> {
        let mut node = match self.fixups.get(node.node_type.as_str()) {
            Some(fixup) => fixup(node)?,
            None => node,
        };

        node.content = std::mem::take(&mut node.content)
            .into_iter()
            .map(|(key, value)| Ok((key, self.apply_to_value(value)?)))
            .collect::<Result<_>>()?;

        node.children = std::mem::take(&mut node.children)
            .into_iter()
            .map(|child| self.apply(child))
            .collect::<Result<_>>()?;

        Ok(node)
    }

    fn apply_to_action(&self, mut action: DraftScoreAction) -> Result<DraftScoreAction> {
        if let Some(page) = action.page.take() {
            action.page = Some(Box::new(self.apply(*page)?));
        }
        Ok(action)
    }

    fn apply_to_value(&self, value: ContentValue) -> Result<ContentValue> {
        let value = match value {
            ContentValue::Node(node) => ContentValue::Node(Box::new(self.apply(*node)?)),
            ContentValue::ScoreAction(action) => {
                ContentValue::ScoreAction(self.apply_to_action(action)?)
            }
            ContentValue::ScoreActions(actions) => ContentValue::ScoreActions(
                actions
                    .into_iter()
                    .map(|action| self.apply_to_action(action))
                    .collect::<Result<_>>()?,
            ),
            other => other,
        };
        Ok(value)
    }
}

impl Default for FixupRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn take_count(node: &mut DraftNode, key: &str) -> Result<u64> {
    let value = node.content.shift_remove(key).ok_or_else(|| {
        DraftParseError::structural(format!("table is missing '{key}'"))
    })?;
    value.as_u64().ok_or_else(|| {
        DraftParseError::structural(format!("table '{key}' is not a non-negative integer"))
    })
}

/// Bundle a table's cells and dimensions into one `textGroup` field.
///
/// The table is the only chunk whose editor model expects this shape.
///
/// # Errors
/// Returns `StructuralInvariant` if the cells or either count is missing
/// or malformed.
pub fn repackage_table(mut node: DraftNode) -> Result<DraftNode> {
    let num_rows = take_count(&mut node, "numRows")?;
    let num_cols = take_count(&mut node, "numCols")?;

    let slot = node
        .content
        .get_mut("textGroup")
        .ok_or_else(|| DraftParseError::structural("table is missing 'textGroup'"))?;
    let text_group = match std::mem::replace(slot, ContentValue::Bool(false)) {
        ContentValue::TextGroup(group) => group,
        _ => return Err(DraftParseError::structural("table 'textGroup' is not a text group")),
    };

    let expected = num_rows.saturating_mul(num_cols);
    if text_group.len() as u64 != expected {
        tracing::warn!(
            cells = text_group.len(),
            num_rows,
            num_cols,
            "Table cell count does not match its dimensions"
        );
    }

    *slot = ContentValue::Table(TableGrid {
        text_group,
        num_rows,
        num_cols,
    });
    Ok(node)
}

/// Create a registry holding every built-in fixup.
#[must_use]
pub fn create_default_fixups() -> FixupRegistry {
    let mut registry = FixupRegistry::new();
    registry.register(TABLE_CHUNK, repackage_table);
    registry
}

static DEFAULT_FIXUPS: LazyLock<FixupRegistry> = LazyLock::new(create_default_fixups);

/// Process-wide registry of the built-in fixups.
#[must_use]
pub fn default_fixups() -> &'static FixupRegistry {
    &DEFAULT_FIXUPS
}
