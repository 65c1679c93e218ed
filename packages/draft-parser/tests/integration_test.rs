//! End-to-end tests for the XML to draft conversion pipeline.
//!
//! Runs complete documents from `tests/fixtures` through the public
//! entry points.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use draft_parser::{
    xml_to_draft, xml_to_draft_with, ContentValue, DraftNode, DraftParseError, IdPolicy,
    ParseOptions, SequentialIds,
};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn module() -> DraftNode {
    xml_to_draft(&load_fixture("module.xml"), false).expect("module converts")
}

fn content_json(node: &DraftNode, key: &str) -> serde_json::Value {
    serde_json::to_value(&node.content[key]).expect("content serializes")
}

fn child_types(node: &DraftNode) -> Vec<&str> {
    node.children.iter().map(|c| c.node_type.as_str()).collect()
}

#[test]
fn test_module_structure() {
    let module = module();

    assert_eq!(module.node_type, "ObojoboDraft.Modules.Module");
    assert_eq!(module.id, None);
    assert_eq!(module.content["title"].as_str(), Some("Photosynthesis"));
    // Without id generation a supplied id is ordinary content.
    assert_eq!(module.content["id"].as_str(), Some("module-1"));
    assert_eq!(
        child_types(&module),
        vec!["ObojoboDraft.Sections.Content", "ObojoboDraft.Sections.Assessment"]
    );

    let page = &module.children[0].children[0];
    assert_eq!(page.node_type, "ObojoboDraft.Pages.Page");
    assert_eq!(page.content["title"].as_str(), Some("Introduction"));
    assert_eq!(
        child_types(page),
        vec![
            "ObojoboDraft.Chunks.Heading",
            "ObojoboDraft.Chunks.Text",
            "ObojoboDraft.Chunks.Excerpt",
            "ObojoboDraft.Chunks.List",
            "ObojoboDraft.Chunks.Table",
            "ObojoboDraft.Chunks.HTML",
            "ObojoboDraft.Chunks.Figure",
            "ObojoboDraft.Chunks.Break",
        ]
    );

    assert_eq!(module.count(), 32);
}

#[test]
fn test_text_chunks() {
    let module = module();
    let page = &module.children[0].children[0];

    let heading = &page.children[0];
    assert_eq!(heading.content["headingLevel"], ContentValue::Number(1.into()));
    assert_eq!(
        content_json(heading, "textGroup"),
        json!([{"text": {"value": "How plants eat", "styleList": []}, "data": {}}])
    );

    let text = &page.children[1];
    assert_eq!(
        content_json(text, "textGroup"),
        json!([
            {
                "text": {
                    "value": "Plants turn light into sugar.",
                    "styleList": [{"type": "b", "start": 12, "end": 17}],
                },
                "data": {},
            },
            {
                "text": {
                    "value": "Chlorophyll absorbs red and blue light.",
                    "styleList": [
                        {"type": "i", "start": 20, "end": 23},
                        {"type": "i", "start": 28, "end": 32},
                    ],
                },
                "data": {"indent": 1},
            },
        ])
    );
    assert!(text.children.is_empty());
}

#[test]
fn test_callout_becomes_excerpt() {
    let module = module();
    let excerpt = &module.children[0].children[0].children[2];

    assert!(excerpt.content.is_empty());
    assert_eq!(child_types(excerpt), vec!["ObojoboDraft.Chunks.Text"]);
    assert_eq!(
        content_json(&excerpt.children[0], "textGroup"),
        json!([{"text": {"value": "Sunlight is required.", "styleList": []}, "data": {}}])
    );
}

#[test]
fn test_special_attributes() {
    let module = module();
    let page = &module.children[0].children[0];

    assert_eq!(
        content_json(page, "triggers"),
        json!([{"type": "onMount", "actions": [{"type": "nav:lock", "value": {}}]}])
    );

    let list = &page.children[3];
    assert_eq!(
        content_json(list, "listStyles"),
        json!({"type": "ordered", "indents": {"0": {"bulletStyle": "decimal", "start": 1}}})
    );
    assert_eq!(
        content_json(list, "textGroup").as_array().map(Vec::len),
        Some(2)
    );

    let assessment = &module.children[1];
    assert_eq!(
        content_json(assessment, "rubric"),
        json!({
            "type": "pass-fail",
            "passingAttemptScore": 80,
            "passedResult": 100,
            "failedResult": 0,
            "mods": [{"attemptCondition": "[1,2]", "reward": 5}],
        })
    );
}

#[test]
fn test_table_restructured() {
    let module = module();
    let table = &module.children[0].children[0].children[4];

    assert_eq!(table.node_type, "ObojoboDraft.Chunks.Table");
    assert!(!table.content.contains_key("numRows"));
    assert!(!table.content.contains_key("numCols"));
    assert_eq!(table.content["header"], ContentValue::Bool(true));

    let grid = content_json(table, "textGroup");
    assert_eq!(grid["numRows"], json!(2));
    assert_eq!(grid["numCols"], json!(2));
    let cells: Vec<&str> = grid["textGroup"]
        .as_array()
        .expect("cells")
        .iter()
        .filter_map(|line| line["text"]["value"].as_str())
        .collect();
    assert_eq!(cells, vec!["Input", "Output", "CO2", "O2"]);
}

#[test]
fn test_html_figure_and_break() {
    let module = module();
    let page = &module.children[0].children[0];

    let html = &page.children[5];
    assert_eq!(
        html.content["html"].as_str(),
        Some(r#"<p class="note">Raw <em>markup</em> stays</p>"#)
    );
    assert!(html.children.is_empty());

    let figure = &page.children[6];
    assert_eq!(
        serde_json::to_value(&figure.content).expect("content serializes"),
        json!({"url": "leaf.png", "alt": "A leaf", "size": "medium"})
    );

    let rule = &page.children[7];
    assert!(rule.content.is_empty());
    assert!(rule.children.is_empty());
}

#[test]
fn test_question_solution_and_score_actions() {
    let module = module();
    let assessment = &module.children[1];

    let bank = &assessment.children[0].children[0];
    assert_eq!(bank.node_type, "ObojoboDraft.Chunks.QuestionBank");
    assert_eq!(bank.content["choose"], ContentValue::Number(1.into()));
    assert_eq!(bank.content["select"].as_str(), Some("sequential"));

    let question = &bank.children[0];
    assert_eq!(
        child_types(question),
        vec!["ObojoboDraft.Chunks.Text", "ObojoboDraft.Chunks.MCAssessment"]
    );
    let ContentValue::Node(solution) = &question.content["solution"] else {
        panic!("solution should be a nested node");
    };
    assert_eq!(solution.node_type, "ObojoboDraft.Pages.Page");
    assert_eq!(child_types(solution), vec!["ObojoboDraft.Chunks.Text"]);

    let mc = &question.children[1];
    assert_eq!(mc.content["shuffle"], ContentValue::Bool(false));
    let first_choice = &mc.children[0];
    assert_eq!(first_choice.content["score"], ContentValue::Number(100.into()));
    assert_eq!(
        child_types(first_choice),
        vec![
            "ObojoboDraft.Chunks.MCAssessment.MCAnswer",
            "ObojoboDraft.Chunks.MCAssessment.MCFeedback",
        ]
    );

    let actions = content_json(assessment, "scoreActions");
    let actions = actions.as_array().expect("score actions");
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0]["for"], json!("[0,80)"));
    assert_eq!(actions[1]["for"], json!("[80,100]"));
    assert_eq!(actions[1]["page"]["type"], json!("ObojoboDraft.Pages.Page"));
    assert_eq!(
        actions[1]["page"]["children"][0]["content"]["textGroup"][0]["text"]["value"],
        json!("Well done.")
    );
}

#[test]
fn test_ids_unique_and_preserved() {
    let xml = load_fixture("module.xml");
    let mut ids = SequentialIds::new("n");
    let module = xml_to_draft_with(&xml, &ParseOptions::new(true), &mut ids).expect("converts");

    let all = module.ids();
    assert_eq!(all.len(), module.count());
    let unique: HashSet<&str> = all.iter().copied().collect();
    assert_eq!(unique.len(), all.len());

    assert_eq!(module.id.as_deref(), Some("module-1"));
    assert!(!module.content.contains_key("id"));
    assert_eq!(module.children[0].children[0].id.as_deref(), Some("page-intro"));
    assert_eq!(ids.count(), 30);
}

#[test]
fn test_regenerated_ids() {
    let xml = load_fixture("module.xml");
    let options = ParseOptions::new(true).with_id_policy(IdPolicy::Regenerate);
    let module = xml_to_draft_with(&xml, &options, &mut SequentialIds::new("n")).expect("converts");

    assert_eq!(module.id.as_deref(), Some("n-1"));
    assert!(module.ids().iter().all(|id| id.starts_with("n-")));
}

#[test]
fn test_uuid_ids() {
    let module = xml_to_draft(&load_fixture("module.xml"), true).expect("converts");
    let all = module.ids();
    let unique: HashSet<&str> = all.iter().copied().collect();
    assert_eq!(unique.len(), module.count());
}

#[test]
fn test_deterministic_output() {
    let xml = load_fixture("module.xml");
    assert_eq!(
        xml_to_draft(&xml, false).expect("converts"),
        xml_to_draft(&xml, false).expect("converts")
    );

    let first = xml_to_draft_with(&xml, &ParseOptions::new(true), &mut SequentialIds::default())
        .expect("converts");
    let second = xml_to_draft_with(&xml, &ParseOptions::new(true), &mut SequentialIds::default())
        .expect("converts");
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn test_attribute_element_round_trip() {
    let root = xml_to_draft(
        "<Doc><Node><Item><title>Hello</title></Item></Node></Doc>",
        false,
    )
    .expect("converts");

    assert_eq!(
        serde_json::to_value(&root).expect("serializes"),
        json!({
            "type": "Node",
            "content": {},
            "children": [{"type": "Item", "content": {"title": "Hello"}, "children": []}],
        })
    );
}

#[test]
fn test_malformed_xml() {
    let err = xml_to_draft(&load_fixture("malformed.xml"), false).unwrap_err();
    assert!(matches!(err, DraftParseError::Tokenization(_)));
}

#[test]
fn test_duplicate_attribute() {
    let err = xml_to_draft(&load_fixture("duplicate.xml"), false).unwrap_err();
    let DraftParseError::DuplicateAttribute { element, name } = err else {
        panic!("expected a duplicate attribute error, got {err}");
    };
    assert_eq!(element, "ObojoboDraft.Modules.Module");
    assert_eq!(name, "title");
}

#[test]
fn test_sub_parser_failure_aborts() {
    let xml = r#"<Doc><Page><triggers><trigger type="onMount">
        <action type="nav:goto" value="{broken"/>
    </trigger></triggers></Page></Doc>"#;
    let err = xml_to_draft(xml, false).unwrap_err();
    let DraftParseError::SubParser { name, path, .. } = err else {
        panic!("expected a sub-parser error, got {err}");
    };
    assert_eq!(name, "triggers");
    assert_eq!(path, "Doc/ObojoboDraft.Pages.Page/triggers");
}

fn nested(depth: usize) -> String {
    format!("<Doc>{}{}</Doc>", "<A>".repeat(depth), "</A>".repeat(depth))
}

#[test]
fn test_depth_limit() {
    // The document element counts as the first level.
    let xml = nested(70);

    let err = xml_to_draft(&xml, false).unwrap_err();
    assert!(matches!(
        err,
        DraftParseError::TooDeep {
            depth: 65,
            limit: 64
        }
    ));

    let options = ParseOptions::default().with_max_depth(71);
    let root = xml_to_draft_with(&xml, &options, &mut SequentialIds::default())
        .expect("deep document converts with a raised limit");
    assert_eq!(root.count(), 70);
}

#[test]
fn test_pathologically_deep_document() {
    let err = xml_to_draft(&nested(10_000), false).unwrap_err();
    assert!(matches!(err, DraftParseError::TooDeep { limit: 64, .. }));
}

#[test]
fn test_depth_limit_has_a_ceiling() {
    let options = ParseOptions::default().with_max_depth(20_000);
    let err = xml_to_draft_with(&nested(10_000), &options, &mut SequentialIds::default())
        .unwrap_err();
    assert!(matches!(err, DraftParseError::InvalidOption(_)));
}

#[test]
fn test_inline_styles_in_text_shorthand() {
    let root = xml_to_draft(
        "<Doc><Text>Hello <b>world</b> and <b>more</b></Text></Doc>",
        false,
    )
    .expect("converts");

    assert_eq!(root.node_type, "ObojoboDraft.Chunks.Text");
    assert!(!root.content.contains_key("b"));
    assert_eq!(
        content_json(&root, "textGroup"),
        json!([{
            "text": {
                "value": "Hello world and more",
                "styleList": [
                    {"type": "b", "start": 6, "end": 11},
                    {"type": "b", "start": 16, "end": 20},
                ],
            },
            "data": {},
        }])
    );
}

#[test]
fn test_heading_shorthand_keeps_triggers_out_of_text() {
    let xml = r#"<Doc><Heading headingLevel="2">
        <triggers><trigger type="onMount"><action type="nav:lock"/></trigger></triggers>
        Big <i>news</i>
    </Heading></Doc>"#;
    let root = xml_to_draft(xml, false).expect("converts");

    assert_eq!(root.node_type, "ObojoboDraft.Chunks.Heading");
    assert_eq!(
        content_json(&root, "triggers"),
        json!([{"type": "onMount", "actions": [{"type": "nav:lock", "value": {}}]}])
    );
    assert_eq!(
        content_json(&root, "textGroup"),
        json!([{
            "text": {"value": "Big news", "styleList": [{"type": "i", "start": 4, "end": 8}]},
            "data": {},
        }])
    );
}

#[test]
fn test_html_markup_is_not_renamed_or_expanded() {
    let xml = r#"<Doc><HTML><Image src="a.png"/><Callout>note</Callout></HTML></Doc>"#;
    let root = xml_to_draft(xml, false).expect("converts");
    assert_eq!(
        root.content["html"].as_str(),
        Some(r#"<Image src="a.png"/><Callout>note</Callout>"#)
    );
}

#[test]
fn test_whitespace_kept_inside_lines() {
    let xml = "<Doc><Text><t>  spaced  <b> out </b></t></Text></Doc>";
    let root = xml_to_draft(xml, false).expect("converts");
    assert_eq!(
        content_json(&root, "textGroup"),
        json!([{
            "text": {"value": "  spaced   out ", "styleList": [{"type": "b", "start": 10, "end": 15}]},
            "data": {},
        }])
    );
}
