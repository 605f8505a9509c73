//! Specificity tests through the public API.
//!
//! Reference vectors follow the standard (ids, classes, types) counting
//! rules: pseudo-elements weigh like types, attribute selectors and
//! pseudo-classes like classes, and the functional pseudo-classes `:not()`,
//! `:is()`, and `:has()` contribute their argument while `:where()`
//! contributes nothing.

use proptest::prelude::*;
use rulescope::{Specificity, specificity};

#[test]
fn test_simple_selectors() {
    assert_eq!(specificity("div"), Specificity::new(0, 0, 1));
    assert_eq!(specificity(".btn"), Specificity::new(0, 1, 0));
    assert_eq!(specificity("#cta"), Specificity::new(1, 0, 0));
    assert_eq!(specificity("*"), Specificity::ZERO);
    assert_eq!(specificity(""), Specificity::ZERO);
}

#[test]
fn test_compound_and_complex_selectors() {
    assert_eq!(specificity("button#cta.btn"), Specificity::new(1, 1, 1));
    assert_eq!(specificity("nav ul li a"), Specificity::new(0, 0, 4));
    assert_eq!(specificity("ul > li + li"), Specificity::new(0, 0, 3));
    assert_eq!(
        specificity("#main .sidebar a:hover"),
        Specificity::new(1, 2, 1)
    );
}

#[test]
fn test_attributes_and_pseudo_classes_count_as_classes() {
    assert_eq!(specificity("[href]"), Specificity::new(0, 1, 0));
    assert_eq!(specificity("a[href^=\"https\"]"), Specificity::new(0, 1, 1));
    assert_eq!(specificity(":hover"), Specificity::new(0, 1, 0));
    assert_eq!(specificity("li:nth-child(2n+1)"), Specificity::new(0, 1, 1));
}

#[test]
fn test_pseudo_elements_weigh_like_types() {
    assert_eq!(specificity("p::before"), Specificity::new(0, 0, 2));
    assert_eq!(specificity("p:before"), Specificity::new(0, 0, 2));
    assert_eq!(specificity("::selection"), Specificity::new(0, 0, 1));
    assert_eq!(specificity("a::first-line"), Specificity::new(0, 0, 2));
}

#[test]
fn test_functional_pseudo_classes() {
    // :not, :is, :has contribute their inner text counted as a standalone
    // selector, so a selector list sums.
    assert_eq!(specificity(":not(.a)"), Specificity::new(0, 1, 0));
    assert_eq!(specificity(":not(#a, .b)"), Specificity::new(1, 1, 0));
    assert_eq!(specificity("div:is(.x, p)"), Specificity::new(0, 1, 2));
    assert_eq!(specificity("a:has(> img)"), Specificity::new(0, 0, 2));
    // :where always contributes zero.
    assert_eq!(specificity(":where(#a, .b)"), Specificity::ZERO);
    assert_eq!(specificity("div:where(#a)"), Specificity::new(0, 0, 1));
}

#[test]
fn test_nested_functional_pseudo_classes() {
    assert_eq!(specificity(":not(:not(#a))"), Specificity::new(1, 0, 0));
    assert_eq!(specificity(":is(:where(#a), .b)"), Specificity::new(0, 1, 0));
}

#[test]
fn test_malformed_selectors_count_at_face_value() {
    // An unterminated functional argument leaves the tail counted as-is.
    assert_eq!(specificity(":not(.a"), Specificity::new(0, 2, 0));
    assert_eq!(specificity("#"), Specificity::ZERO);
    assert_eq!(specificity("..a"), Specificity::new(0, 1, 0));
    assert_eq!(specificity("div > >"), Specificity::new(0, 0, 1));
}

#[test]
fn test_deeply_nested_input_does_not_overflow() {
    let mut sel = String::new();
    for _ in 0..10_000 {
        sel.push_str(":not(");
    }
    sel.push_str("#a");
    for _ in 0..10_000 {
        sel.push(')');
    }
    // Only the result type matters; the call must return, not blow the stack.
    let _ = specificity(&sel);
}

#[test]
fn test_ordering_is_lexicographic() {
    // One id beats any number of classes, one class beats any number of
    // types.
    assert!(Specificity::new(1, 0, 0) > Specificity::new(0, 99, 99));
    assert!(Specificity::new(0, 1, 0) > Specificity::new(0, 0, 99));
    assert!(Specificity::new(0, 1, 2) > Specificity::new(0, 1, 1));
}

proptest! {
    #[test]
    fn prop_specificity_never_panics(s in "\\PC{0,64}") {
        let _ = specificity(&s);
    }

    #[test]
    fn prop_where_wrapping_zeroes_any_selector(s in "[a-z#.:()\\[\\] ]{0,32}") {
        // A bare :where(...) never contributes, whatever it wraps, as long
        // as the argument has no unbalanced parens of its own.
        prop_assume!(!s.contains('(') && !s.contains(')'));
        let wrapped = format!(":where({s})");
        prop_assert_eq!(specificity(&wrapped), Specificity::ZERO);
    }

    #[test]
    fn prop_repeating_a_class_adds_up(n in 1usize..20) {
        let sel = ".x".repeat(n);
        prop_assert_eq!(specificity(&sel), Specificity::new(0, n as u32, 0));
    }
}
