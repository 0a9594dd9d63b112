//! Merging declarations into an element's `style` attribute.

use crate::css::DeclarationMap;
use crate::dom::{Document, NodeId};

const STYLE_ATTR: &str = "style";

/// Combine existing inline style text with incoming declarations.
///
/// Incoming properties overwrite existing ones (later write wins). Untouched
/// properties keep their position; new ones are appended in incoming order.
pub fn merge_style(current: Option<&str>, incoming: &DeclarationMap) -> DeclarationMap {
    let mut merged = current.map(DeclarationMap::parse).unwrap_or_default();
    merged.merge(incoming);
    merged
}

/// Merge `incoming` into the `style` attribute of `element`.
///
/// When the merged result is empty and `strip_empty` is set, the attribute
/// is left as it was instead of being written as `style=""`.
pub fn merge_into_element(
    doc: &mut Document,
    element: NodeId,
    incoming: &DeclarationMap,
    strip_empty: bool,
) {
    let merged = merge_style(doc.get_attr(element, STYLE_ATTR), incoming);
    if merged.is_empty() && strip_empty {
        return;
    }
    doc.set_attr(element, STYLE_ATTR, merged.to_string());
}
