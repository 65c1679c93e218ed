//! Tree-rewriting passes over the generic tree, in execution order.
//!
//! Each pass takes a [`Node`](crate::tree::Node) by value and returns the
//! rewritten tree.

mod classify;
mod extensions;
mod html;
mod merge;
mod names;
mod whitespace;

pub use classify::{classify_attributes, is_attribute_name};
pub use extensions::expand_extensions;
pub use html::mark_html;
pub use merge::merge_attributes;
pub use names::{canonical_name, normalize_names};
pub use whitespace::{filter_whitespace, is_whitespace};
