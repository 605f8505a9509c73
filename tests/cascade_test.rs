//! End-to-end cascade tests through the public API: parse sheets, scan a
//! synthetic element, resolve the cascade, check ranking and conflicts.

use rulescope::sheet::SheetRule;
use rulescope::{
    Document, ElementData, Error, Result, ScanConfig, Specificity, StyleSource, Stylesheet,
    analyze,
};

fn button() -> (Document, rulescope::NodeId) {
    let mut doc = Document::new();
    let id = doc.append(
        None,
        ElementData::new("button")
            .with_id("cta")
            .with_classes("btn btn-primary"),
    );
    (doc, id)
}

#[test]
fn test_cascade_ranking_and_conflict_report() {
    let (doc, id) = button();
    let sheets = vec![
        Stylesheet::parse("base.css", ".btn { color: red; }"),
        Stylesheet::parse(
            "theme.css",
            "#cta { color: blue; } .btn-primary { color: green; }",
        ),
    ];

    let analysis = analyze(&doc.element(id), &sheets, &ScanConfig::default());

    let order: Vec<_> = analysis
        .matches
        .iter()
        .map(|r| r.selector.as_str())
        .collect();
    assert_eq!(order, vec!["#cta", ".btn-primary", ".btn"]);
    assert_eq!(
        analysis.matches.winner().unwrap().specificity,
        Specificity::new(1, 0, 0)
    );

    assert_eq!(analysis.conflicts.len(), 1);
    let conflict = &analysis.conflicts[0];
    assert_eq!(conflict.property, "color");
    let values: Vec<_> = conflict
        .contributors
        .iter()
        .map(|c| c.value.as_str())
        .collect();
    assert_eq!(values, vec!["blue", "green", "red"]);
}

#[test]
fn test_equal_specificity_resolved_by_source_order() {
    let (doc, id) = button();
    let sheets = vec![
        Stylesheet::parse("a.css", ".btn { color: red; }"),
        Stylesheet::parse("b.css", ".btn-primary { color: green; }"),
    ];

    let analysis = analyze(&doc.element(id), &sheets, &ScanConfig::default());
    assert_eq!(analysis.matches.winner().unwrap().selector, ".btn-primary");
    assert_eq!(analysis.matches.winner().unwrap().source, "b.css");
}

#[test]
fn test_inline_style_outranks_everything() {
    let mut doc = Document::new();
    let id = doc.append(
        None,
        ElementData::new("button")
            .with_id("cta")
            .with_inline_style("color: pink"),
    );
    let sheets = vec![Stylesheet::parse("a.css", "#cta { color: blue; }")];

    let analysis = analyze(&doc.element(id), &sheets, &ScanConfig::default());
    let winner = analysis.matches.winner().unwrap();
    assert!(winner.inline);
    assert_eq!(winner.value_of("color"), Some("pink"));

    // The stylesheet declaration still shows up as a losing contributor.
    assert_eq!(analysis.conflicts.len(), 1);
    assert_eq!(analysis.conflicts[0].contributors[0].value, "pink");
    assert_eq!(analysis.conflicts[0].contributors[1].value, "blue");
}

/// A sheet whose rules cannot be read, like a cross-origin stylesheet.
struct OpaqueSheet;

impl StyleSource for OpaqueSheet {
    fn label(&self) -> &str {
        "https://cdn.example/vendored.css"
    }

    fn rules(&self) -> Result<&[SheetRule]> {
        Err(Error::InaccessibleStylesheet(self.label().to_string()))
    }
}

#[test]
fn test_inaccessible_sheet_is_skipped_not_fatal() {
    let (doc, id) = button();
    let readable = Stylesheet::parse("a.css", ".btn { color: red; }");
    let sheets: Vec<&dyn StyleSource> = vec![&OpaqueSheet, &readable];

    let analysis = analyze(&doc.element(id), &sheets, &ScanConfig::default());
    assert_eq!(analysis.matches.len(), 1);
    assert_eq!(analysis.matches.winner().unwrap().source, "a.css");
}

#[test]
fn test_malformed_rules_do_not_poison_the_sheet() {
    let (doc, id) = button();
    let sheets = vec![Stylesheet::parse(
        "a.css",
        ".btn { color: red; } !!garbage!! { nope } #cta { color: blue; }",
    )];

    let analysis = analyze(&doc.element(id), &sheets, &ScanConfig::default());
    assert_eq!(analysis.matches.len(), 2);
    assert_eq!(analysis.matches.winner().unwrap().selector, "#cta");
}

#[test]
fn test_at_rules_are_carried_but_never_match() {
    let sheet = Stylesheet::parse(
        "a.css",
        "@media (min-width: 600px) { .btn { color: red; } } .btn { color: blue; }",
    );
    assert!(
        sheet
            .rules()
            .iter()
            .any(|r| matches!(r, SheetRule::At { name } if name == "media"))
    );

    let (doc, id) = button();
    let analysis = analyze(&doc.element(id), &[sheet], &ScanConfig::default());
    assert_eq!(analysis.matches.len(), 1);
    assert_eq!(analysis.matches.winner().unwrap().value_of("color"), Some("blue"));
}

#[test]
fn test_no_matches_yields_empty_analysis() {
    let (doc, id) = button();
    let sheets = vec![Stylesheet::parse("a.css", "p { color: red; }")];

    let analysis = analyze(&doc.element(id), &sheets, &ScanConfig::default());
    assert!(analysis.matches.is_empty());
    assert!(analysis.conflicts.is_empty());
}

#[test]
fn test_descendant_and_attribute_matching() {
    let mut doc = Document::new();
    let nav = doc.append(None, ElementData::new("nav"));
    let link = doc.append(
        Some(nav),
        ElementData::new("a").with_attr("href", "https://example.com"),
    );
    let sheets = vec![Stylesheet::parse(
        "a.css",
        "nav a { color: red; } a[href^=\"https\"] { color: green; } div a { color: black; }",
    )];

    let analysis = analyze(&doc.element(link), &sheets, &ScanConfig::default());
    assert_eq!(analysis.matches.len(), 2);
    // (0,1,1) for the attribute selector beats (0,0,2).
    assert_eq!(
        analysis.matches.winner().unwrap().selector,
        "a[href^=\"https\"]"
    );
}
