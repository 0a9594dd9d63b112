//! End-to-end conversion tests.
//!
//! These exercise the public API on whole documents: rule extraction,
//! class stripping, precedence, declaration leniency and the counters.

use proptest::prelude::*;
use svg_inliner::dom::{self, Document, NodeId};
use svg_inliner::{
    DeclarationMap, Error, Options, SelectorEngine, SelectorQuery, convert, convert_with,
};

/// Style attribute of the first element named `tag` in converted markup.
fn style_of(markup: &str, tag: &str) -> Option<String> {
    let doc = dom::parse(markup).expect("converted markup should parse");
    doc.elements()
        .into_iter()
        .find(|&id| doc.element_name(id) == Some(tag))
        .and_then(|id| doc.get_attr(id, "style").map(str::to_string))
}

fn count_elements(markup: &str, pred: impl Fn(&Document, NodeId) -> bool) -> usize {
    let doc = dom::parse(markup).expect("converted markup should parse");
    doc.elements().into_iter().filter(|&id| pred(&doc, id)).count()
}

// ============================================================================
// End-to-end examples
// ============================================================================

#[test]
fn test_single_class_rule() {
    let out = convert(r#"<svg><style>.c{fill:red;}</style><rect class="c"/></svg>"#).unwrap();

    assert_eq!(out.markup, r#"<svg><rect style="fill:red"/></svg>"#);
    assert_eq!(out.stats.converted_styles, 1);
    assert!(!out.markup.contains("<style"));
    assert!(!out.markup.contains("class="));
}

#[test]
fn test_unclosed_tag_fails_without_output() {
    let result = convert(r#"<svg><style>.c{fill:red}</style><g><rect class="c"/></svg>"#);
    let err = result.unwrap_err();
    assert!(err.is_parse_error());
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_non_svg_root_fails() {
    assert!(matches!(
        convert("<html><body/></html>"),
        Err(Error::MissingRoot)
    ));
}

#[test]
fn test_content_outside_root_fails() {
    for input in ["junk<svg/>", "<svg/>trailing junk", "<svg/>&amp;"] {
        let err = convert(input).unwrap_err();
        assert!(err.is_parse_error(), "{input:?} gave {err}");
    }
    assert!(convert("\n<svg/>\n").is_ok());
}

#[test]
fn test_invalid_attribute_character_fails() {
    let err = convert(r#"<svg><rect a="x<y"/></svg>"#).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_undefined_entity_fails() {
    for input in [
        r#"<svg><rect a="&nbsp;"/></svg>"#,
        "<svg><text>a &nbsp; b</text></svg>",
        "<svg><style>.a{content:&bogus;}</style></svg>",
    ] {
        let err = convert(input).unwrap_err();
        assert!(err.is_parse_error(), "{input:?} gave {err}");
    }
}

#[test]
fn test_predefined_entities_survive() {
    let out = convert(r#"<svg><text font-family="&quot;A&amp;B&quot;">1 &lt; 2</text></svg>"#)
        .unwrap();
    assert_eq!(
        out.markup,
        r#"<svg><text font-family="&quot;A&amp;B&quot;">1 &lt; 2</text></svg>"#
    );
}

#[test]
fn test_realistic_icon() {
    let input = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><defs><style>.cls-1{fill:none;stroke:#000;stroke-width:2px;}.cls-2{fill:#e30613;}</style></defs><title>icon</title><circle class="cls-1" cx="12" cy="12" r="10"/><path class="cls-2" d="M6 12h12"/></svg>"#;
    let out = convert(input).unwrap();

    assert_eq!(
        style_of(&out.markup, "circle").as_deref(),
        Some("fill:none;stroke:#000;stroke-width:2px")
    );
    assert_eq!(style_of(&out.markup, "path").as_deref(), Some("fill:#e30613"));
    assert!(out.markup.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(out.markup.contains("<defs/>"));
    assert!(out.markup.contains("<title>icon</title>"));
}

// ============================================================================
// Extraction completeness
// ============================================================================

#[test]
fn test_all_blocks_extracted_in_source_order() {
    let input = r#"<svg>
        <style>.a{fill:red} rect{stroke:blue}</style>
        <g><style><![CDATA[ .b { opacity: .5 } ]]></style></g>
        <style>#x{x:1}</style>
    </svg>"#;
    let out = convert(input).unwrap();

    let selectors: Vec<_> = out.stats.rules.iter().map(|r| r.selector.as_str()).collect();
    assert_eq!(selectors, vec![".a", "rect", ".b", "#x"]);
    assert_eq!(
        count_elements(&out.markup, |d, id| d.element_name(id) == Some("style")),
        0
    );
}

// ============================================================================
// Class stripping
// ============================================================================

#[test]
fn test_class_removed_everywhere() {
    let input = r#"<svg class="root"><style>.used{fill:red}</style><g class="unused"><rect class="used"/><circle class="a b"/></g></svg>"#;
    let out = convert(input).unwrap();

    assert_eq!(
        count_elements(&out.markup, |d, id| d.get_attr(id, "class").is_some()),
        0
    );
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_rule_overrides_existing_inline_style() {
    let out =
        convert(r#"<svg><style>rect{fill:blue}</style><rect style="fill:red"/></svg>"#).unwrap();
    assert_eq!(style_of(&out.markup, "rect").as_deref(), Some("fill:blue"));
}

#[test]
fn test_later_rule_wins() {
    let out =
        convert(r#"<svg><style>.a{x:1} .a{x:2}</style><rect class="a"/></svg>"#).unwrap();
    assert_eq!(style_of(&out.markup, "rect").as_deref(), Some("x:2"));
}

#[test]
fn test_empty_rule_still_writes_style() {
    let out = convert(r#"<svg><style>.a{;;}</style><rect class="a"/></svg>"#).unwrap();
    assert_eq!(out.markup, r#"<svg><rect style=""/></svg>"#);
    assert_eq!(out.stats.processed_elements, 2);
}

#[test]
fn test_malformed_inline_style_is_rewritten() {
    let out =
        convert(r#"<svg><style>.a{;;}</style><rect class="a" style="bogus"/></svg>"#).unwrap();
    assert_eq!(out.markup, r#"<svg><rect style=""/></svg>"#);
}

#[test]
fn test_strip_empty_style_keeps_attribute_as_is() {
    let options = Options::default().with_strip_empty_style(true);
    let out = convert_with(
        r#"<svg><style>.a{;;}</style><rect class="a" style="bogus"/><circle class="a"/></svg>"#,
        &SelectorEngine,
        &options,
    )
    .unwrap();
    assert_eq!(out.markup, r#"<svg><rect style="bogus"/><circle/></svg>"#);
}

#[test]
fn test_untouched_inline_properties_survive() {
    let out = convert(
        r#"<svg><style>.a{fill:blue;stroke:red}</style><rect class="a" style="opacity:.3;fill:green"/></svg>"#,
    )
    .unwrap();
    assert_eq!(
        style_of(&out.markup, "rect").as_deref(),
        Some("opacity:.3;fill:blue;stroke:red")
    );
}

// ============================================================================
// Leniency
// ============================================================================

#[test]
fn test_declaration_leniency() {
    let map = DeclarationMap::parse("color:red;;invalid;fill:green");
    let pairs: Vec<_> = map.iter().collect();
    assert_eq!(pairs, vec![("color", "red"), ("fill", "green")]);
}

#[test]
fn test_malformed_css_is_not_an_error() {
    let input = r#"<svg><style>/* note */ rect:hover{fill:red} {x:1} .a{;;} @media print{.a{fill:red}} .b{fill:blue}</style><rect class="b"/></svg>"#;
    let out = convert(input).unwrap();
    assert!(!out.markup.contains("<style"));
    assert!(out.stats.converted_styles >= 1);
}

// ============================================================================
// Counters
// ============================================================================

#[test]
fn test_converted_styles_counts_rules_not_matches() {
    let out = convert(
        r#"<svg><style>rect{fill:red} .none{x:1} g{y:2}</style><rect/><rect/><rect/></svg>"#,
    )
    .unwrap();
    assert_eq!(out.stats.converted_styles, 3);
    assert_eq!(out.stats.processed_elements, 3);
}

#[test]
fn test_processed_elements_double_counts_overlap() {
    let out = convert(
        r#"<svg><style>.c{fill:red} *[class~="c"]{stroke:blue} rect{x:1}</style><rect class="c"/></svg>"#,
    )
    .unwrap();

    // .c and *[class~="c"] match in both passes, rect only structurally
    assert_eq!(out.stats.converted_styles, 3);
    assert_eq!(out.stats.processed_elements, 5);
    assert_eq!(
        style_of(&out.markup, "rect").as_deref(),
        Some("fill:red;stroke:blue;x:1")
    );
}

// ============================================================================
// Injected selector query
// ============================================================================

/// Matches only bare type selectors.
struct TagOnly;

impl SelectorQuery for TagOnly {
    fn query(&self, doc: &Document, selector: &str) -> Vec<NodeId> {
        doc.elements()
            .into_iter()
            .filter(|&id| doc.local_name(id) == Some(selector))
            .collect()
    }
}

#[test]
fn test_custom_query_is_used() {
    let input = r#"<svg><style>rect{fill:red} g rect{stroke:blue}</style><g><rect/></g></svg>"#;
    let out = convert_with(input, &TagOnly, &Options::default()).unwrap();

    assert_eq!(out.stats.processed_elements, 1);
    assert_eq!(style_of(&out.markup, "rect").as_deref(), Some("fill:red"));

    let full = convert_with(input, &SelectorEngine, &Options::default()).unwrap();
    assert_eq!(full.stats.processed_elements, 2);
}

// ============================================================================
// Property tests
// ============================================================================

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z-]{0,8}"
}

fn value() -> impl Strategy<Value = String> {
    "[a-z0-9#.]{1,8}"
}

proptest! {
    #[test]
    fn prop_well_formed_declarations_all_kept(
        decls in prop::collection::vec((ident(), value()), 1..8)
    ) {
        let text: String = decls
            .iter()
            .map(|(p, v)| format!(" {p} : {v} ;"))
            .collect();
        let map = DeclarationMap::parse(&text);

        for (p, _) in &decls {
            let last = decls.iter().rev().find(|(q, _)| q == p).map(|(_, v)| v.as_str());
            prop_assert_eq!(map.get(p), last);
        }
    }

    #[test]
    fn prop_garbage_fragments_never_add_entries(
        decls in prop::collection::vec((ident(), value()), 0..5),
        junk in prop::collection::vec("[a-z ]{0,6}", 0..5)
    ) {
        let mut text: Vec<String> = decls.iter().map(|(p, v)| format!("{p}:{v}")).collect();
        text.extend(junk.iter().cloned());
        let map = DeclarationMap::parse(&text.join(";"));

        let distinct: std::collections::HashSet<_> = decls.iter().map(|(p, _)| p).collect();
        prop_assert_eq!(map.len(), distinct.len());
    }

    #[test]
    fn prop_rule_value_wins_over_inline(
        prop_name in ident(),
        inline in value(),
        rule in value()
    ) {
        let input = format!(
            r#"<svg><style>rect{{{prop_name}:{rule}}}</style><rect style="{prop_name}:{inline}"/></svg>"#
        );
        let out = convert(&input).unwrap();
        prop_assert_eq!(style_of(&out.markup, "rect"), Some(format!("{prop_name}:{rule}")));
    }
}
