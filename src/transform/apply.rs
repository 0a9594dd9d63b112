//! Matching rules to elements and writing the result inline.
//!
//! Two independent strategies run over the same rule list:
//!
//! 1. Structural: every rule's selector is run through a [`SelectorQuery`].
//! 2. Class fallback: every element's whole `class` value is treated as one
//!    token and compared textually with `.token` and `*[class~="token"]`.
//!
//! A rule/element pair found by both strategies is merged (and counted)
//! twice. All matches are planned against the unmodified tree and only then
//! applied, followed by removal of every `class` attribute.

use log::debug;

use super::merge::merge_into_element;
use crate::css::StyleRule;
use crate::dom::{Document, NodeId};
use crate::query::SelectorQuery;

const CLASS_ATTR: &str = "class";

/// Counters produced by [`apply_rules`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyCounts {
    /// Rules processed by the structural pass.
    pub converted_styles: usize,
    /// Merges performed across both passes.
    pub processed_elements: usize,
}

/// Everything [`apply_rules`] will do, computed before the tree changes.
#[derive(Debug, Default)]
struct Plan {
    /// `(element, rule index)` in application order.
    merges: Vec<(NodeId, usize)>,
    /// Elements whose `class` attribute is removed afterwards.
    class_holders: Vec<NodeId>,
}

/// Apply `rules` to `doc` and strip `class` attributes.
pub fn apply_rules<Q: SelectorQuery + ?Sized>(
    doc: &mut Document,
    rules: &[StyleRule],
    query: &Q,
    strip_empty_style: bool,
) -> ApplyCounts {
    let plan = plan(doc, rules, query);
    debug!(
        "planned {} merges, {} class attributes to strip",
        plan.merges.len(),
        plan.class_holders.len()
    );

    for &(element, rule) in &plan.merges {
        merge_into_element(doc, element, &rules[rule].declarations, strip_empty_style);
    }
    for &element in &plan.class_holders {
        doc.remove_attr(element, CLASS_ATTR);
    }

    ApplyCounts {
        converted_styles: rules.len(),
        processed_elements: plan.merges.len(),
    }
}

fn plan<Q: SelectorQuery + ?Sized>(doc: &Document, rules: &[StyleRule], query: &Q) -> Plan {
    let mut plan = Plan::default();

    for (index, rule) in rules.iter().enumerate() {
        for element in query.query(doc, &rule.selector) {
            plan.merges.push((element, index));
        }
    }

    for element in doc.elements() {
        let Some(token) = doc.get_attr(element, CLASS_ATTR) else {
            continue;
        };
        for (index, rule) in rules.iter().enumerate() {
            if is_class_selector_for(&rule.selector, token) {
                plan.merges.push((element, index));
            }
        }
        plan.class_holders.push(element);
    }

    plan
}

/// Whether `selector` is literally `.token` or `*[class~="token"]`.
fn is_class_selector_for(selector: &str, token: &str) -> bool {
    if let Some(name) = selector.strip_prefix('.') {
        return name == token;
    }
    selector
        .strip_prefix("*[class~=\"")
        .and_then(|rest| rest.strip_suffix("\"]"))
        .is_some_and(|name| name == token)
}
