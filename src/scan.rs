//! Stylesheet rule scanner.
//!
//! Walks the injected stylesheet sources in document order, matches style
//! rules against a target element through the host's matching primitive,
//! and emits one [`CssRuleRecord`] per matching rule. All collaborator
//! failures are recovered locally: an inaccessible sheet is omitted, a rule
//! the matcher rejects is skipped, and scanning continues.

use log::{debug, trace};

use crate::error::Result;
use crate::selector::{Specificity, specificity};
use crate::sheet::{Declaration, RuleSelector, SheetRule, StyleSource, parse_declarations};

/// Source label given to the synthesized inline-style record.
pub const INLINE_SOURCE: &str = "inline";

/// An element the scanner can test rules against.
///
/// `matches` is the host's selector-matching primitive (the bundled
/// implementation is [`crate::dom::ElementRef`]; a browser host forwards to
/// `Element.matches`). An `Err` skips that rule only.
pub trait TargetElement {
    fn matches(&self, selector: &RuleSelector) -> Result<bool>;

    /// Raw text of the element's `style` attribute, when present.
    fn inline_style(&self) -> Option<&str>;
}

/// Bounds on scan output, so pages with very large stylesheets stay cheap.
/// Tuning constants, not behavioral contracts.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Stop scanning after this many matching rules. The synthesized
    /// inline-style record is exempt.
    pub max_matches: usize,
    /// Keep at most this many distinct properties per record.
    pub max_properties_per_rule: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_matches: 64,
            max_properties_per_rule: 128,
        }
    }
}

/// One stylesheet rule (or the inline style) that matched the target
/// element, with everything the resolver needs to rank it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CssRuleRecord {
    /// The matching selector as written. For a rule whose selector list
    /// matches more than once, the most specific matching selector.
    pub selector: String,
    pub specificity: Specificity,
    /// Label of the originating sheet, or [`INLINE_SOURCE`].
    pub source: String,
    /// Declared properties, deduplicated in insertion order; a repeated
    /// property keeps its last declared value.
    pub declarations: Vec<Declaration>,
    /// Global encounter order across all sheets in the scan.
    pub order: usize,
    /// Inline-style origin. Outranks any stylesheet specificity.
    pub inline: bool,
}

impl CssRuleRecord {
    /// Names of the properties this rule declares, in declaration order.
    pub fn declared_properties(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.property.as_str())
    }

    /// The value this rule declares for `property`, if any.
    pub fn value_of(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }
}

/// Collect the rules matching `element` across `sheets`, in encounter order.
///
/// The result is unranked; feed it to [`crate::resolve`] for cascade order
/// and conflict detection, or use [`crate::analyze`] for both in one call.
pub fn scan<E, S>(element: &E, sheets: &[S], config: &ScanConfig) -> Vec<CssRuleRecord>
where
    E: TargetElement,
    S: StyleSource,
{
    let mut records = Vec::new();
    let mut order = 0usize;

    'sheets: for sheet in sheets {
        let rules = match sheet.rules() {
            Ok(rules) => rules,
            Err(err) => {
                // Cross-origin or otherwise unreadable: fewer matches, not
                // an error.
                debug!("skipping stylesheet {:?}: {err}", sheet.label());
                continue;
            }
        };

        for rule in rules {
            let SheetRule::Style(rule) = rule else {
                continue;
            };
            let rule_order = order;
            order += 1;

            if records.len() >= config.max_matches {
                break 'sheets;
            }

            // The record carries the most specific matching selector out of
            // the rule's selector list; that is the one CSS ranks by.
            let mut best: Option<(&RuleSelector, Specificity)> = None;
            let mut rejected = false;
            for sel in &rule.selectors {
                match element.matches(sel) {
                    Ok(true) => {
                        let spec = specificity(sel.text());
                        if best.is_none_or(|(_, current)| spec > current) {
                            best = Some((sel, spec));
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        trace!("skipping rule {:?}: {err}", sel.text());
                        rejected = true;
                        break;
                    }
                }
            }
            if rejected {
                continue;
            }
            let Some((sel, spec)) = best else {
                continue;
            };

            records.push(CssRuleRecord {
                selector: sel.text().to_string(),
                specificity: spec,
                source: sheet.label().to_string(),
                declarations: dedup_declarations(&rule.declarations, config.max_properties_per_rule),
                order: rule_order,
                inline: false,
            });
        }
    }

    // Inline styles rank above every stylesheet rule: flagged as inline and
    // ordered after the last counted rule, so they also win any tie-break.
    if let Some(style) = element.inline_style() {
        let declarations =
            dedup_declarations(&parse_declarations(style), config.max_properties_per_rule);
        if !declarations.is_empty() {
            records.push(CssRuleRecord {
                selector: "element.style".to_string(),
                specificity: Specificity::ZERO,
                source: INLINE_SOURCE.to_string(),
                declarations,
                order,
                inline: true,
            });
        }
    }

    records
}

/// Deduplicate declarations by property, keeping insertion order; a repeated
/// property keeps its last declared value, as within a CSS block.
fn dedup_declarations(declarations: &[Declaration], cap: usize) -> Vec<Declaration> {
    let mut out: Vec<Declaration> = Vec::new();
    for decl in declarations {
        if let Some(existing) = out.iter_mut().find(|d| d.property == decl.property) {
            existing.value.clone_from(&decl.value);
            existing.important = decl.important;
        } else if out.len() < cap {
            out.push(decl.clone());
        }
    }
    out
}
