//! selectors crate Element implementation for the synthetic tree.
//!
//! This is the bundled selector-matching primitive: a `SelectorImpl` over
//! plain strings plus an `Element` impl for [`ElementRef`], so compiled
//! selectors can be matched without a live browser document.

use std::fmt;

use cssparser::{CowRcStr, SourceLocation};
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::{MatchingContext, SelectorCaches};
use selectors::parser::SelectorParseErrorKind;
use selectors::{OpaqueElement, SelectorImpl};

use crate::error::Result;
use crate::scan::TargetElement;
use crate::sheet::RuleSelector;

use super::{Document, NodeId};

/// Our selector implementation for the selectors crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorSelectors;

/// Identifier string type used for every selector ident kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct IdentStr(pub String);

impl precomputed_hash::PrecomputedHash for IdentStr {
    fn precomputed_hash(&self) -> u32 {
        // Simple hash based on string content
        let mut h: u32 = 0;
        for byte in self.0.bytes() {
            h = h.wrapping_mul(31).wrapping_add(byte as u32);
        }
        h
    }
}

impl cssparser::ToCss for IdentStr {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
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

/// Pseudo-element type. Never produced: selectors containing pseudo-elements
/// do not match the element itself, so they fail compilation and the rule is
/// skipped for matching (its specificity can still be computed from text).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoElement {}

impl cssparser::ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = InspectorSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        false
    }

    fn valid_after_slotted(&self) -> bool {
        false
    }
}

/// Non-tree-structural pseudo-classes. State pseudo-classes parse but never
/// match in a static context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NonTSPseudoClass {
    Link,
    Visited,
    Hover,
    Active,
    Focus,
}

impl selectors::parser::NonTSPseudoClass for NonTSPseudoClass {
    type Impl = InspectorSelectors;

    fn is_active_or_hover(&self) -> bool {
        matches!(self, Self::Hover | Self::Active)
    }

    fn is_user_action_state(&self) -> bool {
        matches!(self, Self::Hover | Self::Active | Self::Focus)
    }
}

impl cssparser::ToCss for NonTSPseudoClass {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        match self {
            Self::Link => dest.write_str(":link"),
            Self::Visited => dest.write_str(":visited"),
            Self::Hover => dest.write_str(":hover"),
            Self::Active => dest.write_str(":active"),
            Self::Focus => dest.write_str(":focus"),
        }
    }
}

impl SelectorImpl for InspectorSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = IdentStr;
    type Identifier = IdentStr;
    type LocalName = IdentStr;
    type NamespaceUrl = IdentStr;
    type NamespacePrefix = IdentStr;
    type BorrowedLocalName = IdentStr;
    type BorrowedNamespaceUrl = IdentStr;
    type NonTSPseudoClass = NonTSPseudoClass;
    type PseudoElement = PseudoElement;
}

impl<'i> selectors::parser::Parser<'i> for InspectorSelectors {
    type Impl = InspectorSelectors;
    type Error = SelectorParseErrorKind<'i>;

    fn parse_non_ts_pseudo_class(
        &self,
        location: SourceLocation,
        name: CowRcStr<'i>,
    ) -> std::result::Result<NonTSPseudoClass, cssparser::ParseError<'i, Self::Error>> {
        if name.eq_ignore_ascii_case("link") {
            Ok(NonTSPseudoClass::Link)
        } else if name.eq_ignore_ascii_case("visited") {
            Ok(NonTSPseudoClass::Visited)
        } else if name.eq_ignore_ascii_case("hover") {
            Ok(NonTSPseudoClass::Hover)
        } else if name.eq_ignore_ascii_case("active") {
            Ok(NonTSPseudoClass::Active)
        } else if name.eq_ignore_ascii_case("focus") {
            Ok(NonTSPseudoClass::Focus)
        } else {
            Err(location
                .new_custom_error(SelectorParseErrorKind::UnsupportedPseudoClassOrElement(name)))
        }
    }
}

/// Reference to an element in a [`Document`] for selector matching.
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
            .field("tag", &self.doc.tag(self.id))
            .finish()
    }
}

impl TargetElement for ElementRef<'_> {
    fn matches(&self, selector: &RuleSelector) -> Result<bool> {
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            selectors::matching::MatchingMode::Normal,
            None,
            &mut caches,
            selectors::context::QuirksMode::NoQuirks,
            selectors::matching::NeedsSelectorFlags::No,
            selectors::matching::MatchingForInvalidation::No,
        );
        Ok(selectors::matching::matches_selector(
            selector.compiled(),
            0,
            None,
            self,
            &mut context,
        ))
    }

    fn inline_style(&self) -> Option<&str> {
        self.doc.inline_style(self.id)
    }
}

impl<'a> selectors::Element for ElementRef<'a> {
    type Impl = InspectorSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self)
    }

    fn parent_element(&self) -> Option<Self> {
        self.doc
            .parent(self.id)
            .map(|parent| Self::new(self.doc, parent))
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
        self.doc
            .sibling(self.id, -1)
            .map(|id| Self::new(self.doc, id))
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.doc
            .sibling(self.id, 1)
            .map(|id| Self::new(self.doc, id))
    }

    fn first_element_child(&self) -> Option<Self> {
        self.doc
            .first_child(self.id)
            .map(|id| Self::new(self.doc, id))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        // Assume HTML document
        true
    }

    fn has_local_name(&self, name: &IdentStr) -> bool {
        self.doc.tag(self.id) == name.0
    }

    fn has_namespace(&self, ns: &IdentStr) -> bool {
        // The synthetic tree is namespace-free.
        ns.0.is_empty()
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.doc.tag(self.id) == other.doc.tag(other.id)
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&IdentStr>,
        local_name: &IdentStr,
        operation: &AttrSelectorOperation<&IdentStr>,
    ) -> bool {
        let ns_match = match ns {
            NamespaceConstraint::Any => true,
            NamespaceConstraint::Specific(ns) => ns.0.is_empty(),
        };
        if !ns_match {
            return false;
        }

        for (name, value) in self.doc.attrs(self.id) {
            if name == &local_name.0 {
                return operation.eval_str(value);
            }
        }
        // `id` and `class` are stored structurally but still addressable as
        // attribute selectors.
        match local_name.0.as_str() {
            "id" => self
                .doc
                .element_id(self.id)
                .is_some_and(|id| operation.eval_str(id)),
            "class" => {
                let classes = self.doc.classes(self.id).join(" ");
                !classes.is_empty() && operation.eval_str(&classes)
            }
            _ => false,
        }
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match pc {
            NonTSPseudoClass::Link => self.is_link(),
            // State pseudo-classes don't apply in static context
            _ => false,
        }
    }

    fn match_pseudo_element(
        &self,
        _pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        false
    }

    fn is_link(&self) -> bool {
        self.doc.tag(self.id) == "a" && self.doc.attr(self.id, "href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.doc
            .element_id(self.id)
            .is_some_and(|elem_id| case_sensitivity.eq(elem_id.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.doc
            .classes(self.id)
            .iter()
            .any(|c| case_sensitivity.eq(c.as_bytes(), name.0.as_bytes()))
    }

    fn imported_part(&self, _name: &IdentStr) -> Option<IdentStr> {
        None
    }

    fn is_part(&self, _name: &IdentStr) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        // Text content is not modeled; childless elements count as empty.
        !self.doc.has_children(self.id)
    }

    fn is_root(&self) -> bool {
        self.doc.parent(self.id).is_none()
    }

    fn apply_selector_flags(&self, _flags: selectors::matching::ElementSelectorFlags) {
        // No flag tracking needed for one-shot scans
    }

    fn add_element_unique_hashes(&self, _filter: &mut selectors::bloom::BloomFilter) -> bool {
        // No bloom filter support needed
        false
    }

    fn has_custom_state(&self, _name: &IdentStr) -> bool {
        false
    }
}
