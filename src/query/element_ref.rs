//! selectors crate Element implementation for the arena tree.
//!
//! This enables CSS selector matching against parsed SVG documents.

use std::fmt;

use precomputed_hash::PrecomputedHash;
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::MatchingContext;
use selectors::matching::ElementSelectorFlags;
use selectors::parser::SelectorParseErrorKind;
use selectors::{OpaqueElement, SelectorImpl};

use crate::dom::{Document, NodeData, NodeId};

/// Our selector implementation for the selectors crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgSelectors;

/// Identifier string type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct IdentStr(pub String);

fn string_hash(s: &str) -> u32 {
    let mut h: u32 = 0;
    for byte in s.bytes() {
        h = h.wrapping_mul(31).wrapping_add(byte as u32);
    }
    h
}

impl PrecomputedHash for IdentStr {
    fn precomputed_hash(&self) -> u32 {
        string_hash(&self.0)
    }
}

impl AsRef<str> for IdentStr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for IdentStr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'a> From<&'a str> for IdentStr {
    fn from(s: &'a str) -> Self {
        Self(s.to_string())
    }
}

impl cssparser::ToCss for IdentStr {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

/// Element or attribute local name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct CssLocalName(pub String);

impl PrecomputedHash for CssLocalName {
    fn precomputed_hash(&self) -> u32 {
        string_hash(&self.0)
    }
}

impl cssparser::ToCss for CssLocalName {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

impl From<String> for CssLocalName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'a> From<&'a str> for CssLocalName {
    fn from(s: &'a str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CssLocalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Namespace URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CssNamespace(pub String);

impl PrecomputedHash for CssNamespace {
    fn precomputed_hash(&self) -> u32 {
        string_hash(&self.0)
    }
}

impl cssparser::ToCss for CssNamespace {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

impl From<String> for CssNamespace {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'a> From<&'a str> for CssNamespace {
    fn from(s: &'a str) -> Self {
        Self(s.to_string())
    }
}

impl<'i> selectors::parser::Parser<'i> for SvgSelectors {
    type Impl = SvgSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

/// Pseudo-element type. None are supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoElement {}

impl cssparser::ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = SvgSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        false
    }

    fn valid_after_slotted(&self) -> bool {
        false
    }
}

/// Non-tree-structural pseudo-class type. None are supported, so selectors
/// such as `a:hover` fail to parse and match nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NonTSPseudoClass {}

impl selectors::parser::NonTSPseudoClass for NonTSPseudoClass {
    type Impl = SvgSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl cssparser::ToCss for NonTSPseudoClass {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl SelectorImpl for SvgSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = IdentStr;
    type Identifier = IdentStr;
    type LocalName = CssLocalName;
    type NamespaceUrl = CssNamespace;
    type NamespacePrefix = IdentStr;
    type BorrowedLocalName = CssLocalName;
    type BorrowedNamespaceUrl = CssNamespace;
    type NonTSPseudoClass = NonTSPseudoClass;
    type PseudoElement = PseudoElement;
}

/// Reference to an element in the [`Document`] for selector matching.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    pub doc: &'a Document,
    pub id: NodeId,
}

impl<'a> ElementRef<'a> {
    pub fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("name", &self.doc.element_name(self.id))
            .finish()
    }
}

impl<'a> selectors::Element for ElementRef<'a> {
    type Impl = SvgSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self)
    }

    fn parent_element(&self) -> Option<Self> {
        let node = self.doc.get(self.id)?;
        if self.doc.is_element(node.parent) {
            Some(Self::new(self.doc, node.parent))
        } else {
            None
        }
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let node = self.doc.get(self.id)?;
        let mut current = node.prev_sibling;
        while current.is_some() {
            if self.doc.is_element(current) {
                return Some(Self::new(self.doc, current));
            }
            current = self.doc.get(current)?.prev_sibling;
        }
        None
    }

    fn next_sibling_element(&self) -> Option<Self> {
        let node = self.doc.get(self.id)?;
        let mut current = node.next_sibling;
        while current.is_some() {
            if self.doc.is_element(current) {
                return Some(Self::new(self.doc, current));
            }
            current = self.doc.get(current)?.next_sibling;
        }
        None
    }

    fn first_element_child(&self) -> Option<Self> {
        self.doc
            .children(self.id)
            .find(|&child| self.doc.is_element(child))
            .map(|child| Self::new(self.doc, child))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        // SVG is XML: names match case-sensitively
        false
    }

    fn has_local_name(&self, name: &CssLocalName) -> bool {
        self.doc.local_name(self.id) == Some(name.0.as_str())
    }

    fn has_namespace(&self, ns: &CssNamespace) -> bool {
        self.doc.element_namespace(self.id) == Some(ns.0.as_str())
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.doc.local_name(self.id) == other.doc.local_name(other.id)
            && self.doc.element_namespace(self.id) == other.doc.element_namespace(other.id)
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssNamespace>,
        local_name: &CssLocalName,
        operation: &AttrSelectorOperation<&IdentStr>,
    ) -> bool {
        for attr in self.doc.attrs(self.id) {
            let (prefix, local) = attr
                .name
                .split_once(':')
                .unwrap_or(("", attr.name.as_str()));

            // Prefixed attributes are only reachable through `*|attr`
            let ns_match = match ns {
                NamespaceConstraint::Any => true,
                NamespaceConstraint::Specific(ns) => prefix.is_empty() && ns.0.is_empty(),
            };
            if !ns_match || local != local_name.0 {
                continue;
            }

            return operation.eval_str(&attr.value);
        }
        false
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        _pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        false
    }

    fn is_link(&self) -> bool {
        false
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        match self.doc.get_attr(self.id, "id") {
            Some(elem_id) => case_sensitivity.eq(elem_id.as_bytes(), id.0.as_bytes()),
            None => false,
        }
    }

    fn has_class(&self, name: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.doc
            .get_attr(self.id, "class")
            .is_some_and(|classes| {
                classes
                    .split_whitespace()
                    .any(|c| case_sensitivity.eq(c.as_bytes(), name.0.as_bytes()))
            })
    }

    fn imported_part(&self, _name: &IdentStr) -> Option<IdentStr> {
        None
    }

    fn is_part(&self, _name: &IdentStr) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        for child in self.doc.children(self.id) {
            match self.doc.get(child).map(|n| &n.data) {
                Some(NodeData::Element { .. }) => return false,
                Some(NodeData::Text(t)) | Some(NodeData::CData(t)) if !t.is_empty() => {
                    return false;
                }
                _ => {}
            }
        }
        true
    }

    fn is_root(&self) -> bool {
        self.doc
            .get(self.id)
            .is_some_and(|n| n.parent == self.doc.document())
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn add_element_unique_hashes(&self, _filter: &mut selectors::bloom::BloomFilter) -> bool {
        false
    }

    fn has_custom_state(&self, _name: &IdentStr) -> bool {
        false
    }
}
