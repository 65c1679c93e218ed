//! Name normalizer: authoring and legacy element names to canonical
//! dotted draft types.

use crate::config::HTML_CHUNK;
use crate::tree::{Node, NodeBody};

/// Look up the canonical name for an authoring alias.
///
/// # Examples
/// ```
/// use draft_parser::passes::canonical_name;
///
/// assert_eq!(canonical_name("Page"), Some("ObojoboDraft.Pages.Page"));
/// assert_eq!(canonical_name("Image"), Some("ObojoboDraft.Chunks.Figure"));
/// assert_eq!(canonical_name("textGroup"), None);
/// ```
#[must_use]
pub fn canonical_name(name: &str) -> Option<&'static str> {
    let canonical = match name {
        // Containers
        "Module" => "ObojoboDraft.Modules.Module",
        "Content" => "ObojoboDraft.Sections.Content",
        "Assessment" => "ObojoboDraft.Sections.Assessment",
        "Page" => "ObojoboDraft.Pages.Page",

        // Questions
        "Question" => "ObojoboDraft.Chunks.Question",
        "QuestionBank" => "ObojoboDraft.Chunks.QuestionBank",
        "MCAssessment" => "ObojoboDraft.Chunks.MCAssessment",
        "MCChoice" => "ObojoboDraft.Chunks.MCAssessment.MCChoice",
        "MCAnswer" => "ObojoboDraft.Chunks.MCAssessment.MCAnswer",
        "MCFeedback" => "ObojoboDraft.Chunks.MCAssessment.MCFeedback",
        "NumericAssessment" => "ObojoboDraft.Chunks.NumericAssessment",

        // Chunks
        "ActionButton" | "Button" => "ObojoboDraft.Chunks.ActionButton",
        "Break" | "HR" => "ObojoboDraft.Chunks.Break",
        "Code" => "ObojoboDraft.Chunks.Code",
        "Excerpt" => "ObojoboDraft.Chunks.Excerpt",
        "Figure" | "Image" => "ObojoboDraft.Chunks.Figure",
        "Heading" => "ObojoboDraft.Chunks.Heading",
        "HTML" => "ObojoboDraft.Chunks.HTML",
        "IFrame" => "ObojoboDraft.Chunks.IFrame",
        "List" => "ObojoboDraft.Chunks.List",
        "Materia" => "ObojoboDraft.Chunks.Materia",
        "MathEquation" | "Equation" => "ObojoboDraft.Chunks.MathEquation",
        "Table" => "ObojoboDraft.Chunks.Table",
        "Text" | "Paragraph" => "ObojoboDraft.Chunks.Text",
        "YouTube" | "Video" => "ObojoboDraft.Chunks.YouTube",

        _ => return None,
    };
    Some(canonical)
}

/// Rename every element with a known alias. Structure is unchanged.
///
/// Children of HTML chunks are markup and keep their names.
#[must_use]
pub fn normalize_names(mut node: Node) -> Node {
    if let NodeBody::Element { children, .. } = &mut node.body {
        if let Some(canonical) = canonical_name(&node.name) {
            node.name = canonical.to_string();
        }

        if node.name != HTML_CHUNK {
            *children = std::mem::take(children)
                .into_iter()
                .map(normalize_names)
                .collect();
        }
    }
    node
}
