//! Line-breaking heuristic for compact markup.
//!
//! Works on text only. Every `><` boundary becomes a line break, and a tag
//! that opens directly after another opening tag is indented by two spaces.
//! Nesting depth is not tracked, so indentation is only meaningful one
//! level deep. This is for display; the output is not meant to be parsed
//! back as a faithful copy of the input.

const INDENT: &str = "  ";

/// Insert line breaks (and a one-level indent) between adjacent tags.
pub fn format_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + markup.len() / 8);
    let mut last = 0;

    for (boundary, _) in markup.match_indices("><") {
        let before = &markup[last..=boundary];
        out.push_str(before);
        out.push('\n');

        let next = &markup[boundary + 1..];
        if ends_with_opening_tag(&markup[..=boundary]) && is_opening_tag(next) {
            out.push_str(INDENT);
        }
        last = boundary + 1;
    }
    out.push_str(&markup[last..]);
    out
}

/// Whether `text` starts with an element tag that is not a closing tag.
///
/// Declarations, processing instructions, comments and doctypes (`<?`, `<!`)
/// never open a level.
fn is_opening_tag(text: &str) -> bool {
    text.starts_with('<') && !matches!(text.as_bytes().get(1), Some(b'/' | b'?' | b'!'))
}

/// Whether the tag ending at the end of `text` is not a closing tag.
fn ends_with_opening_tag(text: &str) -> bool {
    match text.rfind('<') {
        Some(start) => is_opening_tag(&text[start..]),
        None => false,
    }
}
