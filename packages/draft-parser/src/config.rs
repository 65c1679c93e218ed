//! Configuration constants and parse options.

use crate::error::{DraftParseError, Result};

/// Element whose children are kept verbatim by the whitespace filter.
pub const RAW_TEXT_ELEMENT: &str = "t";

/// Sentinel name carried by text nodes.
pub const TEXT_NODE_NAME: &str = "#text";

/// Content field that receives the text children of a structural element.
pub const TEXT_FIELD: &str = "text";

/// Content field that receives the serialized children of an HTML chunk.
pub const HTML_FIELD: &str = "html";

/// Attribute that carries an externally supplied node identifier.
pub const ID_ATTRIBUTE: &str = "id";

/// Default maximum element nesting depth.
///
/// Every pass walks the tree recursively, so this bounds stack usage.
/// Authored modules rarely nest beyond twenty levels.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Largest nesting depth a caller may configure.
///
/// roxmltree and the passes recurse once per level; this keeps a parse
/// within the 2 MiB stack of a spawned thread in unoptimized builds.
pub const MAX_DEPTH_CEILING: usize = 100;

/// Canonical draft type of the literal-HTML container.
pub const HTML_CHUNK: &str = "ObojoboDraft.Chunks.HTML";

/// Canonical draft type of the table chunk.
pub const TABLE_CHUNK: &str = "ObojoboDraft.Chunks.Table";

/// How identifiers are assigned when the caller asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Keep an element's own `id` attribute, generate one otherwise.
    #[default]
    PreserveIfPresent,
    /// Always generate a fresh identifier.
    Regenerate,
}

/// Options for a single parse invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Assign an identifier to every draft node.
    pub generate_ids: bool,

    /// Identifier policy, only consulted when `generate_ids` is set.
    pub id_policy: IdPolicy,

    /// Maximum element nesting depth accepted from the tokenizer.
    pub max_depth: usize,
}

impl ParseOptions {
    /// Create options with defaults and the given id flag.
    #[must_use]
    pub fn new(generate_ids: bool) -> Self {
        Self {
            generate_ids,
            id_policy: IdPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the identifier policy.
    #[must_use]
    pub fn with_id_policy(mut self, policy: IdPolicy) -> Self {
        self.id_policy = policy;
        self
    }

    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Validate the options.
    ///
    /// # Examples
    /// ```
    /// use draft_parser::config::ParseOptions;
    ///
    /// assert!(ParseOptions::new(false).validate().is_ok());
    /// assert!(ParseOptions::new(false).with_max_depth(0).validate().is_err());
    /// assert!(ParseOptions::new(false).with_max_depth(10_000).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(DraftParseError::InvalidOption(
                "max_depth must be greater than zero".to_string(),
            ));
        }
        if self.max_depth > MAX_DEPTH_CEILING {
            return Err(DraftParseError::InvalidOption(format!(
                "max_depth must not exceed {MAX_DEPTH_CEILING}"
            )));
        }
        Ok(())
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new(false)
    }
}
