//! Pulling embedded `<style>` blocks out of the tree.

use log::debug;

use crate::css::{StyleRule, parse_rules};
use crate::dom::{Document, NodeId};
use crate::error::Result;

const STYLE_ELEMENT: &str = "style";

/// Collect the rules of every `<style>` element and remove those elements.
///
/// Rules come back in document order: all rules of an earlier block precede
/// those of a later one. Every style element is located and read before any
/// of them is detached.
pub fn extract_rules(doc: &mut Document) -> Result<Vec<StyleRule>> {
    let blocks: Vec<NodeId> = doc
        .elements()
        .into_iter()
        .filter(|&id| doc.local_name(id) == Some(STYLE_ELEMENT))
        .collect();

    let mut rules = Vec::new();
    for &block in &blocks {
        rules.extend(parse_rules(&doc.text_content(block)?));
    }

    for &block in &blocks {
        doc.detach(block);
    }

    debug!(
        "extracted {} rules from {} style blocks",
        rules.len(),
        blocks.len()
    );
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse, serialize};

    #[test]
    fn test_rules_from_all_blocks_in_order() {
        let mut doc = parse(
            "<svg><style>.a{fill:red}</style><g><style>.b{fill:blue} .c{x:1}</style></g></svg>",
        )
        .unwrap();
        let rules = extract_rules(&mut doc).unwrap();

        let selectors: Vec<_> = rules.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec![".a", ".b", ".c"]);
        assert_eq!(serialize(&doc), "<svg><g/></svg>");
    }

    #[test]
    fn test_empty_and_cdata_blocks() {
        let mut doc =
            parse("<svg><style/><style><![CDATA[ rect { stroke : black } ]]></style><rect/></svg>")
                .unwrap();
        let rules = extract_rules(&mut doc).unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].declarations.get("stroke"), Some("black"));
        assert_eq!(serialize(&doc), "<svg><rect/></svg>");
    }

    #[test]
    fn test_escaped_style_text_is_unescaped() {
        let mut doc = parse("<svg><style>g &gt; rect{fill:red}</style></svg>").unwrap();
        let rules = extract_rules(&mut doc).unwrap();
        assert_eq!(rules[0].selector, "g > rect");
    }

    #[test]
    fn test_no_style_blocks() {
        let mut doc = parse("<svg><rect/></svg>").unwrap();
        assert!(extract_rules(&mut doc).unwrap().is_empty());
        assert_eq!(serialize(&doc), "<svg><rect/></svg>");
    }
}
