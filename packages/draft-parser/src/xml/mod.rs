//! XML input and output helpers.
//!
//! - [`tokenizer`]: roxmltree document to generic [`Node`](crate::tree::Node) tree
//! - [`markup`]: generic nodes back to escaped markup text

pub mod markup;
pub mod tokenizer;

pub use markup::{escape_attribute, escape_text, to_markup};
pub use tokenizer::{check_depth, tokenize};
