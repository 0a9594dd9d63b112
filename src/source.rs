//! Loading SVG files.
//!
//! Only names ending in `.svg` (any case) are accepted; everything else is
//! rejected before any decoding or parsing happens.

use std::path::Path;

use encoding_rs::UTF_8;
use log::debug;

use crate::error::{Error, Result};

/// Whether `path` has an `.svg` extension, ignoring case.
pub fn is_svg_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Decode the bytes of a file called `name` into text.
///
/// A byte order mark selects UTF-8 or UTF-16; otherwise UTF-8 is assumed and
/// invalid sequences are replaced.
pub fn decode_svg(name: &str, bytes: &[u8]) -> Result<String> {
    if !is_svg_path(name) {
        return Err(Error::UnsupportedFile(name.to_string()));
    }

    let (text, encoding, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        debug!("{name}: replaced invalid {} sequences", encoding.name());
    }
    Ok(text.into_owned())
}

/// Read and decode an `.svg` file from disk.
pub fn read_svg_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let name = path.to_string_lossy();
    if !is_svg_path(path) {
        return Err(Error::UnsupportedFile(name.into_owned()));
    }
    let bytes = std::fs::read(path)?;
    decode_svg(&name, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_extension_case_insensitive() {
        assert!(is_svg_path("icon.svg"));
        assert!(is_svg_path("ICON.SVG"));
        assert!(is_svg_path("dir/a.b.Svg"));
        assert!(!is_svg_path("icon.png"));
        assert!(!is_svg_path("svg"));
        assert!(!is_svg_path("icon.svgz"));
    }

    #[test]
    fn test_decode_rejects_other_extensions() {
        let err = decode_svg("icon.png", b"<svg/>").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFile(_)));
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_decode_handles_boms() {
        assert_eq!(decode_svg("a.svg", b"\xEF\xBB\xBF<svg/>").unwrap(), "<svg/>");

        let utf16le: Vec<u8> = [0xFF, 0xFE]
            .into_iter()
            .chain("<svg/>".encode_utf16().flat_map(|u| u.to_le_bytes()))
            .collect();
        assert_eq!(decode_svg("a.svg", &utf16le).unwrap(), "<svg/>");
    }

    #[test]
    fn test_decode_replaces_invalid_utf8() {
        let text = decode_svg("a.svg", b"<svg>\xFF</svg>").unwrap();
        assert_eq!(text, "<svg>\u{FFFD}</svg>");
    }
}
