//! Sub-parser registry mapping element names to parsers.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::list_styles::ListStylesParser;
use super::rubric::RubricParser;
use super::score_action::{ScoreActionParser, ScoreActionsParser};
use super::solution::SolutionParser;
use super::text_group::TextGroupParser;
use super::triggers::TriggersParser;
use super::SubParser;

/// Registry mapping canonical element names to sub-parsers.
///
/// Built once and then only read, so a single instance can be shared by
/// concurrent parses.
pub struct SubParserRegistry {
    parsers: HashMap<&'static str, Box<dyn SubParser>>,
}

impl SubParserRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register a parser under its own name.
    pub fn register(&mut self, parser: impl SubParser + 'static) {
        self.parsers.insert(parser.name(), Box::new(parser));
    }

    /// Get the parser for an element name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn SubParser> {
        self.parsers.get(name).map(|p| p.as_ref())
    }

    /// Check if a parser is registered for a name.
    #[must_use]
    pub fn has_parser(&self, name: &str) -> bool {
        self.parsers.contains_key(name)
    }

    /// Return set of all registered names.
    #[must_use]
    pub fn registered_names(&self) -> HashSet<&str> {
        self.parsers.keys().copied().collect()
    }
}

impl Default for SubParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry holding every built-in sub-parser.
#[must_use]
pub fn create_default_registry() -> SubParserRegistry {
    let mut registry = SubParserRegistry::new();

    registry.register(TextGroupParser);
    registry.register(ScoreActionParser);
    registry.register(ScoreActionsParser);
    registry.register(RubricParser);
    registry.register(TriggersParser);
    registry.register(ListStylesParser);
    registry.register(SolutionParser);

    registry
}

static DEFAULT_REGISTRY: LazyLock<SubParserRegistry> = LazyLock::new(create_default_registry);

/// Process-wide registry of the built-in sub-parsers.
#[must_use]
pub fn default_registry() -> &'static SubParserRegistry {
    &DEFAULT_REGISTRY
}
