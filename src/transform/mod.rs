//! SVG style inlining.
//!
//! - Extract: collect rules from `<style>` blocks and remove the blocks
//! - Apply: match rules to elements, merge into `style`, strip `class`
//! - Merge: last-write-wins inline style merging

pub mod apply;
pub mod extract;
pub mod merge;

use log::debug;

use crate::css::StyleRule;
use crate::dom;
use crate::error::Result;
use crate::options::Options;
use crate::pretty::format_markup;
use crate::query::{SelectorEngine, SelectorQuery};

pub use apply::{ApplyCounts, apply_rules};
pub use extract::extract_rules;
pub use merge::{merge_into_element, merge_style};

/// What a conversion did. Reporting only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ConversionResult {
    /// Number of rules extracted (each is processed once structurally).
    pub converted_styles: usize,
    /// Number of rule/element merges across both matching passes.
    pub processed_elements: usize,
    /// Extracted rules in document order.
    pub rules: Vec<StyleRule>,
}

/// Converted markup plus what it took to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub markup: String,
    pub stats: ConversionResult,
}

/// Convert with default options and the built-in selector engine.
pub fn convert(input: &str) -> Result<Conversion> {
    convert_with(input, &SelectorEngine, &Options::default())
}

/// Convert SVG text so that all styling lives in `style` attributes.
///
/// Fails only when `input` is not a well-formed document with an `<svg>`
/// root; no partial output is produced in that case.
pub fn convert_with<Q: SelectorQuery + ?Sized>(
    input: &str,
    query: &Q,
    options: &Options,
) -> Result<Conversion> {
    let mut doc = dom::parse(input)?;

    let rules = extract_rules(&mut doc)?;
    let counts = apply_rules(&mut doc, &rules, query, options.strip_empty_style);

    let mut markup = dom::serialize(&doc);
    if options.pretty {
        markup = format_markup(&markup);
    }

    debug!(
        "converted {} rules into {} inline merges",
        counts.converted_styles, counts.processed_elements
    );

    Ok(Conversion {
        markup,
        stats: ConversionResult {
            converted_styles: counts.converted_styles,
            processed_elements: counts.processed_elements,
            rules,
        },
    })
}
