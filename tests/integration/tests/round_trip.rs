//! Full-pipeline tests: raw text -> parser adapter -> tree ->
//! traversal passes -> serializer -> text.

use onml_parser::parse;
use onml_tree::{on_enter, on_leave, stringify, traverse};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Parsing and re-serializing denotes the same structure, even though
/// the text is not required to be byte-identical.
#[test]
fn round_trip_preserves_structure() {
    let source = "<svg width=\"10\">\n  <g fill=\"red\">\n    <title>hi</title>\n    <rect/>\n  </g>\n</svg>\n";

    let first = parse(source).unwrap();
    let printed = stringify(&first, 2).unwrap();
    let second = parse(&printed).unwrap();

    assert_eq!(first, second);
    // This particular source is already in serializer form.
    assert_eq!(printed, source);
}

#[test]
fn round_trip_is_stable_across_indent_widths() {
    let source = r#"<a x="1"><b>text</b><c><d/></c>42</a>"#;
    let tree = parse(source).unwrap();

    let minified = stringify(&tree, 0).unwrap();
    let pretty = stringify(&tree, 3).unwrap();

    assert_eq!(parse(&minified).unwrap(), tree);
    assert_eq!(parse(&pretty).unwrap(), tree);
    assert_eq!(minified, source);
}

#[test]
fn mutation_pass_between_parse_and_stringify() {
    let mut tree = parse("<doc><keep>a</keep><drop>b</drop><i>c</i></doc>").unwrap();

    traverse(
        &mut tree,
        &mut on_enter(|ctx, node, _parent| match node.name() {
            "drop" => ctx.remove(),
            "i" => ctx.rename("em"),
            _ => {}
        }),
    );

    assert_eq!(tree, json!(["doc", ["keep", "a"], ["em", "c"]]));
    assert_eq!(
        stringify(&tree, 0).unwrap(),
        "<doc><keep>a</keep><em>c</em></doc>"
    );
}

#[test]
fn sequential_passes_share_one_canonical_tree() {
    let mut tree = parse("<r><x/><x/><y/></r>").unwrap();

    // Pass 1: rewrite x to wood. Pass 2: remove wood.
    traverse(
        &mut tree,
        &mut on_leave(|ctx, node, _parent| {
            if node.name() == "x" {
                ctx.replace(json!(["wood"]));
            }
        }),
    );
    assert_eq!(tree, json!(["r", ["wood"], ["wood"], ["y"]]));

    traverse(
        &mut tree,
        &mut on_leave(|ctx, node, _parent| {
            if node.name() == "wood" {
                ctx.remove();
            }
        }),
    );
    assert_eq!(tree, json!(["r", ["y"]]));
    assert_eq!(stringify(&tree, 0).unwrap(), "<r><y/></r>");
}

#[test]
fn cdata_survives_the_pipeline_as_text() {
    let tree = parse("<s><![CDATA[if (a < b) { go(); }]]></s>").unwrap();
    assert_eq!(tree, json!(["s", "if (a < b) { go(); }"]));
    // Serialized without escaping; the CDATA wrapper is gone for good.
    assert_eq!(stringify(&tree, 0).unwrap(), "<s>if (a < b) { go(); }</s>");
}
