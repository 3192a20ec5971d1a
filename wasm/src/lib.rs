//! WebAssembly module for the Together Apart submission form
//!
//! Provides client-side computation for:
//! - Submission validation with per-field messages
//! - Payload shaping before the form POSTs
//! - Option list sorting

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::form::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn parse_values(values_json: &str) -> Result<SubmitFormValues, JsValue> {
    serde_json::from_str(values_json)
        .map_err(|e| js_sys::Error::new(&format!("Invalid form values JSON: {}", e)).into())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| js_sys::Error::new(&format!("Serialization failed: {}", e)).into())
}

/// Validate form values; returns a JSON object of field -> message, empty when valid
#[wasm_bindgen]
pub fn validate_form(values_json: &str) -> Result<String, JsValue> {
    let values = parse_values(values_json)?;
    let errors = validate_submission(&values).err().unwrap_or_default();
    to_json(&errors)
}

/// Validate, then shape the values into the submission payload JSON
///
/// Throws with the field errors when validation fails, so an invalid form
/// never produces a payload.
#[wasm_bindgen]
pub fn prepare_submission(values_json: &str) -> Result<String, JsValue> {
    let values = parse_values(values_json)?;
    if let Err(errors) = validate_submission(&values) {
        web_sys::console::warn_1(&JsValue::from_str(&errors.to_string()));
        return Err(JsValue::from_str(&to_json(&errors)?));
    }
    to_json(&values.to_payload())
}

/// Join tag option labels the way the submission endpoint expects
#[wasm_bindgen]
pub fn join_tags(tags_json: &str) -> Result<String, JsValue> {
    let tags: Vec<SelectOption> = serde_json::from_str(tags_json)
        .map_err(|e| js_sys::Error::new(&format!("Invalid tags JSON: {}", e)))?;
    Ok(join_tag_labels(&tags))
}

/// Sort an option list ascending by label
#[wasm_bindgen]
pub fn sort_options(options_json: &str) -> Result<String, JsValue> {
    let options: Vec<SelectOption> = serde_json::from_str(options_json)
        .map_err(|e| js_sys::Error::new(&format!("Invalid options JSON: {}", e)))?;
    to_json(&sort_by_label(options))
}
