//! Stylesheet rule model and the injected stylesheet collaborator.
//!
//! The scanner never reaches for ambient document state: it is handed an
//! ordered collection of [`StyleSource`] implementations. [`Stylesheet`] is
//! the bundled implementation, parsed leniently from CSS text; hosts with a
//! live document implement the trait themselves and can report a sheet as
//! inaccessible (cross-origin), which omits it from the scan.

mod parse;

pub(crate) use parse::parse_declarations;

use selectors::parser::Selector;

use crate::dom::element_ref::InspectorSelectors;
use crate::error::Result;

/// A single `property: value` declaration.
///
/// The `important` flag is parsed and carried for hosts that want it, but it
/// does not participate in cascade ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// One selector out of a rule's selector list, as raw text plus its
/// compiled form for the bundled matcher.
#[derive(Debug, Clone)]
pub struct RuleSelector {
    text: String,
    compiled: Selector<InspectorSelectors>,
}

impl RuleSelector {
    pub(crate) fn new(text: String, compiled: Selector<InspectorSelectors>) -> Self {
        Self { text, compiled }
    }

    /// The selector as written in the stylesheet.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn compiled(&self) -> &Selector<InspectorSelectors> {
        &self.compiled
    }
}

/// A style rule: selector list plus declaration block.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selectors: Vec<RuleSelector>,
    pub declarations: Vec<Declaration>,
}

/// A rule as encountered in a stylesheet.
///
/// The scanner only consults `Style` rules; everything else is kept as a
/// tagged marker so rule kinds are an enum check, not a shape guess.
#[derive(Debug, Clone)]
pub enum SheetRule {
    Style(StyleRule),
    At { name: String },
}

/// A parsed CSS stylesheet.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    label: String,
    rules: Vec<SheetRule>,
}

impl Stylesheet {
    pub(crate) fn new(label: String, rules: Vec<SheetRule>) -> Self {
        Self { label, rules }
    }

    /// Where this sheet came from, used as the `source` of matched records.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rules(&self) -> &[SheetRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// An ordered, document-scoped source of style rules.
///
/// `rules` returning `Err` models a sheet whose contents cannot be read;
/// the scanner skips it and carries on with the remaining sheets.
pub trait StyleSource {
    fn label(&self) -> &str;
    fn rules(&self) -> Result<&[SheetRule]>;
}

impl StyleSource for Stylesheet {
    fn label(&self) -> &str {
        self.label()
    }

    fn rules(&self) -> Result<&[SheetRule]> {
        Ok(&self.rules)
    }
}

impl<S: StyleSource + ?Sized> StyleSource for &S {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn rules(&self) -> Result<&[SheetRule]> {
        (**self).rules()
    }
}
