//! # svg-inliner
//!
//! Moves the CSS embedded in an SVG's `<style>` blocks into `style`
//! attributes, then removes the blocks and every `class` attribute. The
//! result renders the same in tools that ignore stylesheets (icon
//! pipelines, mail clients, restrictive renderers).
//!
//! ## Quick Start
//!
//! ```
//! use svg_inliner::convert;
//!
//! let svg = r#"<svg><style>.c{fill:red;}</style><rect class="c"/></svg>"#;
//! let out = convert(svg).unwrap();
//!
//! assert_eq!(out.markup, r#"<svg><rect style="fill:red"/></svg>"#);
//! assert_eq!(out.stats.converted_styles, 1);
//! ```
//!
//! ## Precedence
//!
//! Matched declarations are written in rule order and each write replaces
//! the previous value, including values from the element's original inline
//! style. Selector specificity plays no part.
//!
//! ## Leniency
//!
//! Only an unparsable document is an error. Malformed CSS blocks and
//! declarations, and selectors that match nothing, are silently skipped.

pub mod css;
pub mod dom;
pub mod error;
pub mod options;
pub mod pretty;
pub mod query;
pub mod session;
pub mod source;
pub mod stats;
pub mod transform;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use css::{DeclarationMap, StyleRule};
pub use error::{Error, Result};
pub use options::Options;
pub use pretty::format_markup;
pub use query::{SelectorEngine, SelectorQuery};
pub use session::{Report, Session};
pub use source::{decode_svg, is_svg_path, read_svg_file};
pub use stats::Statistics;
pub use transform::{Conversion, ConversionResult, convert, convert_with};
