//! Structural selector queries over a [`Document`].
//!
//! The converter only depends on the [`SelectorQuery`] trait, so a caller
//! can swap in a narrower matcher. [`SelectorEngine`] is the default and
//! runs Servo's `selectors` matcher over the arena tree.

mod element_ref;

use log::trace;
use selectors::context::{MatchingContext, SelectorCaches};
use selectors::parser::{ParseRelative, SelectorList};

pub use element_ref::{ElementRef, SvgSelectors};

use crate::dom::{Document, NodeId};

/// Runs a selector string against a tree.
pub trait SelectorQuery {
    /// All elements matching `selector`, in document order.
    ///
    /// A selector the implementation cannot understand matches nothing.
    fn query(&self, doc: &Document, selector: &str) -> Vec<NodeId>;
}

/// Selector matching backed by the `selectors` crate.
///
/// Supports type, universal, class, id and attribute selectors, compounds,
/// all combinators and comma-separated lists. Pseudo-classes and
/// pseudo-elements are rejected at parse time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorEngine;

impl SelectorQuery for SelectorEngine {
    fn query(&self, doc: &Document, selector: &str) -> Vec<NodeId> {
        let Some(list) = parse_selector_list(selector) else {
            trace!("unsupported selector {selector:?}, skipping");
            return Vec::new();
        };

        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            selectors::matching::MatchingMode::Normal,
            None,
            &mut caches,
            selectors::context::QuirksMode::NoQuirks,
            selectors::matching::NeedsSelectorFlags::No,
            selectors::matching::MatchingForInvalidation::No,
        );

        doc.elements()
            .into_iter()
            .filter(|&id| {
                let elem = ElementRef::new(doc, id);
                list.slice().iter().any(|selector| {
                    selectors::matching::matches_selector(selector, 0, None, &elem, &mut context)
                })
            })
            .collect()
    }
}

/// Parse a comma-separated list of selectors.
fn parse_selector_list(selector: &str) -> Option<SelectorList<SvgSelectors>> {
    let mut input = cssparser::ParserInput::new(selector);
    let mut parser = cssparser::Parser::new(&mut input);
    SelectorList::parse(&SvgSelectors, &mut parser, ParseRelative::No).ok()
}
