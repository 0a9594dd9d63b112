//! Lenient CSS parsing for embedded stylesheets.
//!
//! Only the shape `selector { property: value; ... }` is recognized. Anything
//! that does not fit is dropped rather than reported.

mod declaration;
mod rules;

pub use declaration::DeclarationMap;
pub use rules::{StyleRule, parse_rules};
