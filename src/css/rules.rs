//! Splitting stylesheet text into `selector { declarations }` rules.
//!
//! Blocks are found by brace position alone. Comments, quoted braces, nested
//! blocks and at-rules are not understood; text containing them produces
//! garbage rules for that block (and possibly later ones), which usually
//! just fail to match anything.

use log::trace;
use memchr::memchr;

use super::declaration::DeclarationMap;

/// One parsed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct StyleRule {
    /// Selector text, trimmed, exactly as written otherwise.
    pub selector: String,
    pub declarations: DeclarationMap,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>, declarations: DeclarationMap) -> Self {
        Self {
            selector: selector.into(),
            declarations,
        }
    }
}

/// Parse stylesheet text into rules, in source order.
pub fn parse_rules(css: &str) -> Vec<StyleRule> {
    let bytes = css.as_bytes();
    let mut rules = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let Some(open) = memchr(b'{', &bytes[pos..]).map(|i| pos + i) else {
            break;
        };
        let Some(close) = memchr(b'}', &bytes[open + 1..]).map(|i| open + 1 + i) else {
            trace!("unterminated block at byte {open}, stopping");
            break;
        };

        let selector = css[pos..open].trim();
        let body = css[open + 1..close].trim();
        pos = close + 1;

        if selector.is_empty() || body.is_empty() {
            trace!("skipping empty block {selector:?} {{{body}}}");
            continue;
        }
        rules.push(StyleRule::new(selector, DeclarationMap::parse(body)));
    }

    rules
}
