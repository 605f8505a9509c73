//! WASM bindings for browser-based style analysis.
//!
//! This module exposes specificity and cascade analysis to JavaScript via
//! wasm-bindgen. Results cross the boundary as JSON; the shapes match the
//! crate's serde representations of [`StyleAnalysis`] and its parts.

use wasm_bindgen::prelude::*;

use crate::dom::{Document, ElementData};
use crate::scan::ScanConfig;
use crate::sheet::Stylesheet;
use crate::{analyze, selector};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Compute the specificity of a selector as an `[ids, classes, types]`
/// triple.
///
/// Fail-soft like the rest of the crate: any string yields a triple, with
/// malformed fragments counted at face value.
#[wasm_bindgen]
pub fn selector_specificity(text: &str) -> Vec<u32> {
    let spec = selector::specificity(text);
    vec![spec.ids, spec.classes, spec.types]
}

/// Analyze a synthetic element against a list of stylesheet texts.
///
/// Sheets are labeled `sheet-0`, `sheet-1`, ... in the order given.
/// `classes` is a space-separated class list, like a `class` attribute.
/// Returns the analysis report as JSON.
#[wasm_bindgen]
pub fn analyze_styles(
    sheets: Vec<String>,
    tag: &str,
    id: Option<String>,
    classes: &str,
    inline_style: Option<String>,
) -> Result<String, JsValue> {
    let mut element = ElementData::new(tag).with_classes(classes);
    if let Some(id) = &id {
        element = element.with_id(id);
    }
    if let Some(style) = &inline_style {
        element = element.with_inline_style(style);
    }

    let mut doc = Document::new();
    let node = doc.append(None, element);

    let sheets: Vec<Stylesheet> = sheets
        .iter()
        .enumerate()
        .map(|(i, css)| Stylesheet::parse(&format!("sheet-{i}"), css))
        .collect();

    let analysis = analyze(&doc.element(node), &sheets, &ScanConfig::default());
    serde_json::to_string(&analysis).map_err(|e| JsValue::from_str(&e.to_string()))
}
