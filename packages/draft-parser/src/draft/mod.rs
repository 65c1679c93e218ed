//! Canonical draft tree: node types, identifier generation, the builder
//! that produces nodes from the merged generic tree, and the final
//! structural fixups.

mod builder;
mod fixups;
mod ids;
mod node;

pub use builder::DraftBuilder;
pub use fixups::{create_default_fixups, default_fixups, repackage_table, Fixup, FixupRegistry};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use node::{Content, ContentValue, DraftNode, DraftScoreAction, TableGrid};
