//! WebAssembly module for the Fruit Quality Analysis service
//!
//! Provides client-side computation for:
//! - Full quality reports from known signals
//! - Shelf-life estimates
//! - Condition classification
//! - Percentage formatting matching the API

use shared::{classify_condition, estimate_shelf_life, score_checked, FruitType};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

fn to_js_error(err: ValidationError) -> JsValue {
    let message = err.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Score fruit quality and return the report as JSON
#[wasm_bindgen]
pub fn score_fruit(fruit_type: &str, freshness: f64, ripeness: f64) -> Result<String, JsValue> {
    let report = score_named(fruit_type, freshness, ripeness).map_err(to_js_error)?;

    serde_json::to_string(&report)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize report: {}", e)))
}

/// Estimate shelf life in days
#[wasm_bindgen]
pub fn estimate_fruit_shelf_life(fruit_type: &str, freshness: f64, ripeness: f64) -> Result<u32, JsValue> {
    shelf_life_named(fruit_type, freshness, ripeness).map_err(to_js_error)
}

/// Classify overall condition ("Excellent" ... "Spoiled")
#[wasm_bindgen]
pub fn classify_fruit_condition(
    freshness: f64,
    ripeness: f64,
    shelf_life_days: u32,
) -> Result<String, JsValue> {
    checked_condition(freshness, ripeness, shelf_life_days)
        .map(|level| level.to_string())
        .map_err(to_js_error)
}

/// Format a score the way the API does ("97%")
#[wasm_bindgen]
pub fn format_percentage(value: f64) -> String {
    shared::format_percentage(value)
}

fn score_named(fruit_type: &str, freshness: f64, ripeness: f64) -> Result<QualityReport, ValidationError> {
    let fruit_type: FruitType = fruit_type.parse()?;
    score_checked(fruit_type, freshness, ripeness)
}

fn shelf_life_named(fruit_type: &str, freshness: f64, ripeness: f64) -> Result<u32, ValidationError> {
    let fruit_type: FruitType = fruit_type.parse()?;
    validate_freshness(freshness)?;
    validate_ripeness(ripeness)?;
    Ok(estimate_shelf_life(fruit_type, freshness, ripeness))
}

fn checked_condition(
    freshness: f64,
    ripeness: f64,
    shelf_life_days: u32,
) -> Result<ConditionLevel, ValidationError> {
    validate_freshness(freshness)?;
    validate_ripeness(ripeness)?;
    Ok(classify_condition(freshness, ripeness, shelf_life_days))
}
