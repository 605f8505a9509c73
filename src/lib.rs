//! # rulescope
//!
//! A fast, lightweight library for explaining which CSS rules apply to an
//! element and why.
//!
//! ## Features
//!
//! - Selector specificity as the standard (ids, classes, types) triple,
//!   computed fail-soft on raw selector text
//! - Lenient stylesheet and inline-style parsing; malformed constructs are
//!   skipped, never fatal
//! - Cascade-ordered match sets (inline first, then specificity, then
//!   source order) plus per-property conflict reports
//! - A synthetic element tree for driving the analysis without a browser
//!
//! ## Quick Start
//!
//! ```
//! use rulescope::{analyze, Document, ElementData, ScanConfig, Stylesheet};
//!
//! let mut doc = Document::new();
//! let button = doc.append(
//!     None,
//!     ElementData::new("button")
//!         .with_id("cta")
//!         .with_classes("btn btn-primary"),
//! );
//!
//! let sheets = vec![
//!     Stylesheet::parse("base.css", ".btn { color: red; }"),
//!     Stylesheet::parse("theme.css", "#cta { color: blue; }"),
//! ];
//!
//! let analysis = analyze(&doc.element(button), &sheets, &ScanConfig::default());
//! assert_eq!(analysis.matches.winner().unwrap().selector, "#cta");
//! assert_eq!(analysis.conflicts[0].property, "color");
//! ```
//!
//! ## Pipeline
//!
//! [`analyze`] is [`scan`] followed by [`resolve`]; call the stages
//! separately to rank records gathered from a custom [`TargetElement`]
//! host, such as a browser's own matching primitive.

pub mod cascade;
pub mod dom;
pub mod error;
pub mod scan;
pub mod selector;
pub mod sheet;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use cascade::{ConflictContributor, MatchSet, PropertyConflict, resolve};
pub use dom::{Document, ElementData, ElementRef, NodeId};
pub use error::{Error, Result};
pub use scan::{CssRuleRecord, ScanConfig, TargetElement, scan};
pub use selector::{Specificity, specificity};
pub use sheet::{Declaration, StyleSource, Stylesheet};

/// Everything known about one element's styling in a single report.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleAnalysis {
    /// Matching rules, ranked winning-first.
    pub matches: MatchSet,
    /// Properties declared by two or more of those rules.
    pub conflicts: Vec<PropertyConflict>,
}

/// Scan `sheets` against `element` and resolve the cascade in one call.
pub fn analyze<E, S>(element: &E, sheets: &[S], config: &ScanConfig) -> StyleAnalysis
where
    E: TargetElement,
    S: StyleSource,
{
    let records = scan(element, sheets, config);
    let (matches, conflicts) = resolve(records);
    StyleAnalysis { matches, conflicts }
}
