//! Selector analysis: normalization and specificity calculation.
//!
//! This module contains:
//! - The tokenizer/normalizer that strips pseudo-element tokens and isolates
//!   functional pseudo-classes (`:not()`, `:is()`, `:has()`, `:where()`)
//! - The specificity calculator producing `(ids, classes, types)` triples
//!
//! Both operate on raw selector text and never fail: malformed input is
//! counted at face value rather than rejected, so a panel can show a badge
//! for whatever the user (or a stylesheet) throws at it.

mod specificity;
mod tokenizer;

pub use specificity::{Specificity, specificity};
pub use tokenizer::{FunctionalPseudo, FunctionalSpan, NormalizedSelector, normalize};
