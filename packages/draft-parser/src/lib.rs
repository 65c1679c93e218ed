//! Draft Parser - Convert authored learning-content XML into draft trees.
//!
//! Authors write modules as XML. This crate turns that XML into the
//! canonical draft node tree used by the editor, the viewer, persistence
//! and scoring.
//!
//! # Example
//!
//! ```
//! use draft_parser::xml_to_draft;
//!
//! let xml = r#"
//! <ObojoboDraftDoc>
//!   <Module title="Intro">
//!     <Content>
//!       <Page><Text>Hello world</Text></Page>
//!     </Content>
//!   </Module>
//! </ObojoboDraftDoc>"#;
//!
//! let module = xml_to_draft(xml, false).unwrap();
//! assert_eq!(module.node_type, "ObojoboDraft.Modules.Module");
//! assert!(module.find_type("ObojoboDraft.Chunks.Text").is_some());
//! ```
//!
//! # Architecture
//!
//! The conversion runs as a fixed sequence of passes:
//!
//! - [`xml`]: tokenize the XML into a generic [`tree`]
//! - [`passes`]: whitespace filter, name normalizer, extension expansion,
//!   HTML passthrough, attribute classification and merging
//! - [`parsers`]: sub-parsers for specially named attribute elements
//! - [`draft`]: draft node builder and final structural fixups
//! - [`pipeline`]: the entry points tying the passes together
//! - [`config`]: constants and parse options
//! - [`error`]: error types and Result alias
//! - [`cli`]: command-line interface

pub mod cli;
pub mod config;
pub mod draft;
pub mod error;
pub mod parsers;
pub mod passes;
pub mod pipeline;
pub mod tree;
pub mod value;
pub mod xml;

// Re-export main functions
pub use pipeline::{xml_to_draft, xml_to_draft_with};

// Re-export commonly used items
pub use config::{IdPolicy, ParseOptions};
pub use draft::{ContentValue, DraftNode, IdGenerator, SequentialIds, UuidGenerator};
pub use error::{DraftParseError, Result};
