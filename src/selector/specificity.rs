//! CSS specificity calculation.
//!
//! Converts raw selector text into an `(ids, classes, types)` triple. The
//! counting is structural and fail-soft: it never rejects input, and
//! malformed fragments contribute whatever their tokens are worth at face
//! value.

use std::ops::{Add, AddAssign};

use super::tokenizer::{FunctionalPseudo, ident_end, matching_paren, normalize};

/// Nesting depth past which functional pseudo-class contents are counted at
/// face value instead of recursed, so pathological input cannot overflow the
/// stack.
const MAX_RECURSION_DEPTH: usize = 32;

/// CSS specificity for cascade ordering.
///
/// Compared lexicographically: ids, then classes, then types. Inline-style
/// origin is not part of the triple; the scanner flags it separately and it
/// outranks any triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Specificity {
    /// Weight of ID selectors.
    pub ids: u32,
    /// Weight of class selectors, attribute selectors, and pseudo-classes.
    pub classes: u32,
    /// Weight of type selectors and pseudo-elements.
    pub types: u32,
}

impl Specificity {
    /// Zero specificity (universal selector, empty input).
    pub const ZERO: Self = Self {
        ids: 0,
        classes: 0,
        types: 0,
    };

    pub const fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self {
            ids,
            classes,
            types,
        }
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ids
            .cmp(&other.ids)
            .then(self.classes.cmp(&other.classes))
            .then(self.types.cmp(&other.types))
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            ids: self.ids.saturating_add(rhs.ids),
            classes: self.classes.saturating_add(rhs.classes),
            types: self.types.saturating_add(rhs.types),
        }
    }
}

impl AddAssign for Specificity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::fmt::Display for Specificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.ids, self.classes, self.types)
    }
}

/// Calculate the specificity of a selector.
///
/// Functional pseudo-classes are weighted recursively: `:where()` always
/// contributes zero, `:not()`/`:is()`/`:has()` contribute the counts of
/// their inner text taken as a standalone selector. Empty or unparsable
/// input yields `(0,0,0)` rather than an error.
pub fn specificity(selector: &str) -> Specificity {
    specificity_at(selector, 0)
}

fn specificity_at(selector: &str, depth: usize) -> Specificity {
    let norm = normalize(selector);
    let mut spec = Specificity::ZERO;
    count_remainder(&norm.remainder, &mut spec);
    spec.types = spec.types.saturating_add(norm.pseudo_elements);

    for span in &norm.functions {
        match span.pseudo {
            // Zero regardless of contents.
            FunctionalPseudo::Where => {}
            FunctionalPseudo::Not | FunctionalPseudo::Is | FunctionalPseudo::Has => {
                if depth < MAX_RECURSION_DEPTH {
                    spec += specificity_at(&span.inner, depth + 1);
                } else {
                    count_remainder(&span.inner, &mut spec);
                }
            }
        }
    }
    spec
}

/// Count id/class/type occurrences in normalized selector text.
///
/// Type names only count at component boundaries (start of input or after
/// whitespace, a combinator, or a comma), so `div.foo` counts `div` once and
/// `foo` as a class. `*` and combinators contribute nothing.
fn count_remainder(text: &str, spec: &mut Specificity) {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut boundary = true;

    while pos < bytes.len() {
        match bytes[pos] {
            b'#' => {
                let end = ident_end(bytes, pos + 1);
                if end > pos + 1 {
                    spec.ids = spec.ids.saturating_add(1);
                }
                pos = end.max(pos + 1);
                boundary = false;
            }
            b'.' => {
                let end = ident_end(bytes, pos + 1);
                if end > pos + 1 {
                    spec.classes = spec.classes.saturating_add(1);
                }
                pos = end.max(pos + 1);
                boundary = false;
            }
            b'[' => {
                spec.classes = spec.classes.saturating_add(1);
                pos = skip_attr(bytes, pos);
                boundary = false;
            }
            b':' => {
                let mut name_start = pos + 1;
                if bytes.get(name_start) == Some(&b':') {
                    name_start += 1;
                }
                let name_end = ident_end(bytes, name_start);
                let name = &text[name_start..name_end];
                if name.is_empty() {
                    pos += 1;
                    boundary = false;
                    continue;
                }
                // :where never adds weight, even left literal by an
                // unmatched parenthesis.
                if !name.eq_ignore_ascii_case("where") {
                    spec.classes = spec.classes.saturating_add(1);
                }
                pos = name_end;
                // Skip a functional argument so its contents are not
                // double-counted (e.g. :nth-of-type(2n)).
                if bytes.get(pos) == Some(&b'(')
                    && let Some(close) = matching_paren(bytes, pos)
                {
                    pos = close + 1;
                }
                boundary = false;
            }
            b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'+' | b'~' | b',' => {
                boundary = true;
                pos += 1;
            }
            b'*' => {
                boundary = false;
                pos += 1;
            }
            b'|' | b'(' | b')' => {
                boundary = true;
                pos += 1;
            }
            b if boundary && is_ident_start(b) => {
                let end = ident_end(bytes, pos);
                // A namespace prefix (`svg|rect`) is not a type selector.
                let ns_prefix =
                    bytes.get(end) == Some(&b'|') && bytes.get(end + 1) != Some(&b'=');
                if !ns_prefix {
                    spec.types = spec.types.saturating_add(1);
                }
                pos = end;
                boundary = false;
            }
            _ => {
                pos += 1;
                boundary = false;
            }
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

/// Skip an attribute selector starting at `[`, honoring quoted strings.
/// Unterminated attribute selectors swallow the rest of the input.
fn skip_attr(bytes: &[u8], open: usize) -> usize {
    let mut pos = open + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b']' => return pos + 1,
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
    pos
}
