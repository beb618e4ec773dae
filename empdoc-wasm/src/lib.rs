//! WASM bindings for `empdoc`.
//!
//! Exposes the docs renderer and the `.em` predictor to JavaScript via
//! wasm-bindgen. Navigation state stays on the JS side; these functions are
//! all pure.

use empdoc::{Manifest, NavState, PageConfig};
use wasm_bindgen::prelude::*;

/// Parse a markdown page and return `{ doc, diagnostics }` as JSON.
#[wasm_bindgen]
pub fn parse(input: &str) -> String {
    let result = empdoc::parse(input);
    serde_json::json!({
        "doc": result.doc,
        "diagnostics": result.diagnostics,
    })
    .to_string()
}

/// Render a markdown page as an HTML fragment.
#[wasm_bindgen]
pub fn render_html(input: &str) -> String {
    empdoc::render_markdown(input)
}

/// Wrap an already-rendered body and nav in a standalone HTML page.
#[wasm_bindgen]
pub fn render_page(nav: &str, body: &str, title: Option<String>) -> String {
    let config = PageConfig {
        title,
        ..Default::default()
    };
    empdoc::page_html(&config, nav, body)
}

/// Explain `.em` source text. Returns the prediction as a plain JS object.
#[wasm_bindgen]
pub fn predict(src: &str, file_path: Option<String>) -> Result<JsValue, JsError> {
    let prediction = empdoc::predict(src, file_path.as_deref());
    serde_wasm_bindgen::to_value(&prediction).map_err(|e| JsError::new(&e.to_string()))
}

/// Explain `.em` source text and return the runner-output HTML panel.
#[wasm_bindgen]
pub fn prediction_html(src: &str, file_path: Option<String>) -> String {
    empdoc::prediction_to_html(&empdoc::predict(src, file_path.as_deref()))
}

/// Resolve which manifest page a location hash shows.
#[wasm_bindgen]
pub fn resolve_page(manifest_json: &str, hash: Option<String>) -> Result<Option<String>, JsError> {
    let manifest = Manifest::from_json(manifest_json).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(NavState::initial(&manifest, hash.as_deref()).current)
}

/// Navigation links for the pages whose title matches `query`.
#[wasm_bindgen]
pub fn nav_html(manifest_json: &str, query: &str, active: Option<String>) -> Result<String, JsError> {
    let manifest = Manifest::from_json(manifest_json).map_err(|e| JsError::new(&e.to_string()))?;
    let pages = empdoc::nav::filter_pages(&manifest.pages, query);
    Ok(empdoc::nav::nav_html(&pages, active.as_deref()))
}
