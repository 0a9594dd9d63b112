//! Error types for SVG conversion.

use thiserror::Error;

/// Errors that can occur while reading or converting a document.
///
/// Malformed CSS never produces an error; unusable rules and declarations
/// are dropped. Only a document that cannot be parsed fails a conversion.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML parsing error: unclosed tag <{0}>")]
    UnclosedTag(String),

    #[error("XML parsing error: unexpected end tag </{0}>")]
    UnexpectedEndTag(String),

    #[error("XML parsing error: document has more than one root element")]
    MultipleRoots,

    #[error("XML parsing error: content outside the root element: {0:?}")]
    ContentOutsideRoot(String),

    #[error("XML parsing error: '<' in value of attribute {0}")]
    InvalidAttributeValue(String),

    #[error("XML parsing error: {0}")]
    InvalidEntity(String),

    #[error("Invalid SVG: no <svg> root element found")]
    MissingRoot,

    #[error("Unsupported file: {0} (expected .svg)")]
    UnsupportedFile(String),
}

impl Error {
    /// Whether this error means the input text itself is not a usable document.
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::UnsupportedFile(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
