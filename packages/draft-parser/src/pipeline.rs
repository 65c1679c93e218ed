//! Conversion pipeline that ties all passes together.

use crate::config::ParseOptions;
use crate::draft::{default_fixups, DraftBuilder, DraftNode, IdGenerator, UuidGenerator};
use crate::error::{DraftParseError, Result};
use crate::parsers::default_registry;
use crate::passes::{
    classify_attributes, expand_extensions, filter_whitespace, mark_html, merge_attributes,
    normalize_names,
};
use crate::tree::Node;
use crate::xml::tokenize;

/// Convert an XML document into a draft tree.
///
/// The document element is a wrapper: its single structural child is
/// returned. Identifiers are random UUIDs when `generate_ids` is set.
///
/// # Errors
/// Any [`DraftParseError`]; no partial tree is returned.
///
/// # Examples
/// ```
/// let xml = r#"<ObojoboDraftDoc><Module><title>Intro</title></Module></ObojoboDraftDoc>"#;
/// let root = draft_parser::xml_to_draft(xml, false).unwrap();
/// assert_eq!(root.node_type, "ObojoboDraft.Modules.Module");
/// assert_eq!(root.content["title"].as_str(), Some("Intro"));
/// ```
pub fn xml_to_draft(xml: &str, generate_ids: bool) -> Result<DraftNode> {
    xml_to_draft_with(xml, &ParseOptions::new(generate_ids), &mut UuidGenerator)
}

/// Convert an XML document with explicit options and identifier source.
///
/// # Errors
/// Any [`DraftParseError`]; no partial tree is returned.
pub fn xml_to_draft_with(
    xml: &str,
    options: &ParseOptions,
    ids: &mut dyn IdGenerator,
) -> Result<DraftNode> {
    options.validate()?;

    let tree = tokenize(xml, options.max_depth)?;
    tracing::debug!(nodes = tree.count(), root = %tree.name, "Tokenized document");

    let tree = filter_whitespace(tree);
    let tree = normalize_names(tree);
    let tree = expand_extensions(tree);
    let tree = mark_html(tree);
    let tree = classify_attributes(tree, default_registry())?;
    let tree = merge_attributes(tree)?;
    tracing::debug!(nodes = tree.count(), "Attributes classified and merged");

    let root = document_root(tree)?;
    let draft = DraftBuilder::new(options, ids).build(root)?;
    let draft = default_fixups().apply(draft)?;
    tracing::debug!(
        nodes = draft.count(),
        root = %draft.node_type,
        "Built draft tree"
    );

    Ok(draft)
}

/// Unwrap the document element to its single structural child.
fn document_root(document: Node) -> Result<Node> {
    if !document.is_element() {
        return Err(DraftParseError::structural(format!(
            "document element <{}> is not structural",
            document.name
        )));
    }

    let name = document.name.clone();
    let mut roots = document
        .into_child_nodes()
        .into_iter()
        .filter(Node::is_element);

    match (roots.next(), roots.next()) {
        (Some(root), None) => Ok(root),
        (None, _) => Err(DraftParseError::structural(format!(
            "document <{name}> has no content element"
        ))),
        (Some(_), Some(_)) => Err(DraftParseError::structural(format!(
            "document <{name}> has more than one content element"
        ))),
    }
}
