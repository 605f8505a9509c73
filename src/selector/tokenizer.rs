//! Selector normalization for structural counting.
//!
//! Splits a raw selector into the parts the specificity calculator needs:
//! the selector text with pseudo-element tokens removed, the number of
//! pseudo-elements that were removed, and the inner text of each functional
//! pseudo-class (`:not()`, `:is()`, `:has()`, `:where()`) so it can be
//! weighted recursively.
//!
//! Nothing here is an error: an unmatched parenthesis or unknown construct
//! is left as literal text in the remainder for the calculator to count at
//! face value.

use memchr::memchr;

/// Functional pseudo-classes that require recursive specificity handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionalPseudo {
    Not,
    Is,
    Has,
    Where,
}

impl FunctionalPseudo {
    fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("not") {
            Some(Self::Not)
        } else if name.eq_ignore_ascii_case("is") {
            Some(Self::Is)
        } else if name.eq_ignore_ascii_case("has") {
            Some(Self::Has)
        } else if name.eq_ignore_ascii_case("where") {
            Some(Self::Where)
        } else {
            None
        }
    }
}

/// One functional pseudo-class occurrence with its inner selector text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalSpan {
    pub pseudo: FunctionalPseudo,
    pub inner: String,
}

/// A selector prepared for structural counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSelector {
    /// Selector text with pseudo-elements and functional pseudo-class spans
    /// removed.
    pub remainder: String,
    /// Functional pseudo-class spans, in source order.
    pub functions: Vec<FunctionalSpan>,
    /// Number of pseudo-element tokens stripped. Each weighs like a type.
    pub pseudo_elements: u32,
}

/// Single-colon tokens that are pseudo-elements for historical reasons.
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

/// Normalize a raw selector for specificity counting.
pub fn normalize(selector: &str) -> NormalizedSelector {
    let bytes = selector.as_bytes();
    let mut remainder = String::with_capacity(selector.len());
    let mut functions = Vec::new();
    let mut pseudo_elements = 0u32;

    let mut pos = 0;
    while let Some(off) = memchr(b':', &bytes[pos..]) {
        let colon = pos + off;
        remainder.push_str(&selector[pos..colon]);

        let double = bytes.get(colon + 1) == Some(&b':');
        let name_start = if double { colon + 2 } else { colon + 1 };
        let name_end = ident_end(bytes, name_start);
        let name = &selector[name_start..name_end];

        if name.is_empty() {
            // Stray colon(s); keep literal.
            remainder.push_str(&selector[colon..name_start]);
            pos = name_start;
            continue;
        }

        if double {
            // `::ident` is always a pseudo-element. Skip a functional
            // argument if one follows (e.g. ::part(x)).
            pseudo_elements += 1;
            pos = match bytes.get(name_end) {
                Some(&b'(') => match matching_paren(bytes, name_end) {
                    Some(close) => close + 1,
                    None => {
                        // Unmatched: the tail stays literal, minus the
                        // pseudo-element token already consumed.
                        remainder.push_str(&selector[name_end..]);
                        bytes.len()
                    }
                },
                _ => name_end,
            };
            continue;
        }

        if let Some(pseudo) = FunctionalPseudo::from_name(name)
            && bytes.get(name_end) == Some(&b'(')
        {
            match matching_paren(bytes, name_end) {
                Some(close) => {
                    functions.push(FunctionalSpan {
                        pseudo,
                        inner: selector[name_end + 1..close].trim().to_string(),
                    });
                    pos = close + 1;
                }
                None => {
                    // Unmatched parenthesis: leave the tail as literal text.
                    remainder.push_str(&selector[colon..]);
                    pos = bytes.len();
                }
            }
            continue;
        }

        if LEGACY_PSEUDO_ELEMENTS
            .iter()
            .any(|p| p.eq_ignore_ascii_case(name))
        {
            pseudo_elements += 1;
            pos = name_end;
            continue;
        }

        // Plain pseudo-class: kept in the remainder, the calculator weighs
        // it like a class.
        remainder.push_str(&selector[colon..name_end]);
        pos = name_end;
    }
    remainder.push_str(&selector[pos..]);

    NormalizedSelector {
        remainder,
        functions,
        pseudo_elements,
    }
}

/// End of an identifier starting at `start` (ASCII alphanumerics, `-`, `_`,
/// and any non-ASCII byte).
pub(crate) fn ident_end(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    while pos < bytes.len() {
        let b = bytes[pos];
        if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b >= 0x80 {
            pos += 1;
        } else {
            break;
        }
    }
    pos
}

/// Index of the `)` matching the `(` at `open`, honoring nesting, quoted
/// strings, and backslash escapes. `None` if unmatched.
pub(crate) fn matching_paren(bytes: &[u8], open: usize) -> Option<usize> {
    debug_assert_eq!(bytes[open], b'(');
    let mut depth = 0usize;
    let mut pos = open;
    while pos < bytes.len() {
        match bytes[pos] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            b'"' | b'\'' => {
                let quote = bytes[pos];
                pos += 1;
                while pos < bytes.len() && bytes[pos] != quote {
                    if bytes[pos] == b'\\' {
                        pos += 1;
                    }
                    pos += 1;
                }
            }
            b'\\' => pos += 1,
            _ => {}
        }
        pos += 1;
    }
    None
}
