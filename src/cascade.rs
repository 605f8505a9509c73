//! Cascade ordering and property conflict detection.
//!
//! Pure functions over scan output: rank matched records the way the CSS
//! cascade would (`!important` excepted, which is deliberately unmodeled)
//! and flag properties that more than one rule declares.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::scan::CssRuleRecord;

/// The rules matching one element, ranked winning-first.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSet {
    records: Vec<CssRuleRecord>,
}

impl MatchSet {
    pub fn records(&self) -> &[CssRuleRecord] {
        &self.records
    }

    /// The record whose declarations win the cascade, if any matched.
    pub fn winner(&self) -> Option<&CssRuleRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CssRuleRecord> {
        self.records.iter()
    }
}

impl std::ops::Index<usize> for MatchSet {
    type Output = CssRuleRecord;

    fn index(&self, index: usize) -> &CssRuleRecord {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a CssRuleRecord;
    type IntoIter = std::slice::Iter<'a, CssRuleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// One rule's stake in a contested property.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConflictContributor {
    /// Index of the contributing record in the ranked [`MatchSet`].
    pub rule: usize,
    /// The value that record declares for the property. Declared, not
    /// computed: an unrelated later rule could still override it by other
    /// means.
    pub value: String,
}

/// A CSS property declared by two or more matching rules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyConflict {
    pub property: String,
    /// Contributors in winning-to-losing rank order.
    pub contributors: Vec<ConflictContributor>,
}

/// Cascade comparator, winning record first.
///
/// Descending by (inline origin, ids, classes, types); among equals the
/// later `order` ranks higher, the standard cascade tie-break. `order` is
/// unique per scan, so this is a total order and sorting is deterministic.
fn cascade_rank(a: &CssRuleRecord, b: &CssRuleRecord) -> Ordering {
    b.inline
        .cmp(&a.inline)
        .then_with(|| b.specificity.cmp(&a.specificity))
        .then_with(|| b.order.cmp(&a.order))
}

/// Rank scanned records into a [`MatchSet`] and report property conflicts.
///
/// Pure and side-effect free; the same input always yields the same output.
pub fn resolve(mut records: Vec<CssRuleRecord>) -> (MatchSet, Vec<PropertyConflict>) {
    records.sort_unstable_by(cascade_rank);

    let mut conflicts: Vec<PropertyConflict> = Vec::new();
    let mut by_property: HashMap<&str, usize> = HashMap::new();

    for (rank, record) in records.iter().enumerate() {
        for decl in &record.declarations {
            let slot = match by_property.get(decl.property.as_str()) {
                Some(&slot) => slot,
                None => {
                    conflicts.push(PropertyConflict {
                        property: decl.property.clone(),
                        contributors: Vec::new(),
                    });
                    conflicts.len() - 1
                }
            };
            conflicts[slot].contributors.push(ConflictContributor {
                rule: rank,
                value: decl.value.clone(),
            });
        }
    }
    // Keep only contested properties, in first-seen rank order.
    conflicts.retain(|c| c.contributors.len() >= 2);

    (MatchSet { records }, conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Specificity;
    use crate::sheet::Declaration;

    fn record(selector: &str, spec: Specificity, order: usize, decls: &[(&str, &str)]) -> CssRuleRecord {
        CssRuleRecord {
            selector: selector.to_string(),
            specificity: spec,
            source: "test.css".to_string(),
            declarations: decls
                .iter()
                .map(|(p, v)| Declaration {
                    property: p.to_string(),
                    value: v.to_string(),
                    important: false,
                })
                .collect(),
            order,
            inline: false,
        }
    }

    fn inline_record(order: usize, decls: &[(&str, &str)]) -> CssRuleRecord {
        CssRuleRecord {
            inline: true,
            source: "inline".to_string(),
            selector: "element.style".to_string(),
            ..record("element.style", Specificity::ZERO, order, decls)
        }
    }

    #[test]
    fn ranks_by_specificity() {
        let records = vec![
            record(".btn", Specificity::new(0, 1, 0), 0, &[]),
            record("#cta", Specificity::new(1, 0, 0), 1, &[]),
            record("button", Specificity::new(0, 0, 1), 2, &[]),
        ];
        let (set, _) = resolve(records);
        let order: Vec<_> = set.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(order, vec!["#cta", ".btn", "button"]);
    }

    #[test]
    fn equal_specificity_later_order_wins() {
        let records = vec![
            record(".a", Specificity::new(0, 1, 0), 0, &[]),
            record(".b", Specificity::new(0, 1, 0), 1, &[]),
        ];
        let (set, _) = resolve(records);
        assert_eq!(set.winner().unwrap().selector, ".b");
    }

    #[test]
    fn inline_outranks_any_specificity() {
        let records = vec![
            record("#very#specific", Specificity::new(2, 0, 0), 0, &[]),
            inline_record(1, &[("color", "pink")]),
        ];
        let (set, _) = resolve(records);
        assert!(set.winner().unwrap().inline);
    }

    #[test]
    fn conflicts_require_two_contributors() {
        let records = vec![
            record(".a", Specificity::new(0, 1, 0), 0, &[("color", "red"), ("margin", "0")]),
            record(".b", Specificity::new(0, 1, 0), 1, &[("color", "blue")]),
        ];
        let (set, conflicts) = resolve(records);
        assert_eq!(conflicts.len(), 1);
        let conflict = &conflicts[0];
        assert_eq!(conflict.property, "color");
        // Winning-to-losing: .b (later, same specificity) first.
        assert_eq!(set[conflict.contributors[0].rule].selector, ".b");
        assert_eq!(conflict.contributors[0].value, "blue");
        assert_eq!(set[conflict.contributors[1].rule].selector, ".a");
        assert_eq!(conflict.contributors[1].value, "red");
    }

    #[test]
    fn no_conflicts_when_properties_disjoint() {
        let records = vec![
            record(".a", Specificity::new(0, 1, 0), 0, &[("color", "red")]),
            record(".b", Specificity::new(0, 1, 0), 1, &[("margin", "0")]),
        ];
        let (_, conflicts) = resolve(records);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn resolve_is_idempotent() {
        let records = vec![
            record(".a", Specificity::new(0, 2, 0), 3, &[("color", "red")]),
            record(".b", Specificity::new(0, 1, 0), 1, &[("color", "blue")]),
            record(".c", Specificity::new(0, 2, 0), 2, &[("color", "green")]),
        ];
        let (first, first_conflicts) = resolve(records);
        let (second, second_conflicts) = resolve(first.records().to_vec());

        let a: Vec<_> = first.iter().map(|r| r.order).collect();
        let b: Vec<_> = second.iter().map(|r| r.order).collect();
        assert_eq!(a, b);
        assert_eq!(first_conflicts, second_conflicts);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let (set, conflicts) = resolve(Vec::new());
        assert!(set.is_empty());
        assert!(set.winner().is_none());
        assert!(conflicts.is_empty());
    }
}
