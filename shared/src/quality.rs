//! Deterministic fruit quality scoring
//!
//! Turns (fruit type, freshness, ripeness) into a shelf-life estimate, a
//! condition tier and a list of handling recommendations. Every function
//! here is pure and safe to call from any number of threads.

use crate::models::{ConditionLevel, FruitType, QualityInput, QualityReport};
use crate::validation::ValidationError;

/// Longest base shelf life across the known fruit (apples, 21 days)
pub const MAX_BASE_SHELF_LIFE_DAYS: u32 = {
    let mut max = 0;
    let mut i = 0;
    while i < FruitType::KNOWN.len() {
        let days = FruitType::KNOWN[i].base_shelf_life_days();
        if days > max {
            max = days;
        }
        i += 1;
    }
    max
};

/// Ripeness with the longest remaining shelf life
pub const OPTIMAL_RIPENESS: f64 = 60.0;

/// Discount applied on top of the freshness and ripeness factors
pub const SHELF_LIFE_SAFETY_FACTOR: f64 = 0.8;

pub const FRESHNESS_WEIGHT: f64 = 0.4;
pub const RIPENESS_WEIGHT: f64 = 0.3;
pub const SHELF_LIFE_WEIGHT: f64 = 0.3;

// ============================================================================
// Shelf Life
// ============================================================================

/// Estimate remaining shelf life in whole days (never less than one).
///
/// The ripeness factor peaks at 1.0 for ripeness 60 and falls off linearly
/// on both sides; it is used as-is, without clamping.
pub fn estimate_shelf_life(fruit_type: FruitType, freshness: f64, ripeness: f64) -> u32 {
    let base = f64::from(fruit_type.base_shelf_life_days());
    let freshness_factor = freshness / 100.0;
    let ripeness_factor = 1.0 - ((ripeness - OPTIMAL_RIPENESS) / 100.0).abs();

    let raw = base * freshness_factor * ripeness_factor * SHELF_LIFE_SAFETY_FACTOR;
    raw.floor().max(1.0) as u32
}

// ============================================================================
// Overall Condition
// ============================================================================

/// Weighted composite of freshness, ripeness and normalised shelf life.
///
/// Shelf life is normalised against [`MAX_BASE_SHELF_LIFE_DAYS`] for every
/// fruit, so the result is not bounded to 0-100.
pub fn condition_score(freshness: f64, ripeness: f64, shelf_life_days: u32) -> f64 {
    let normalized_shelf_life =
        f64::from(shelf_life_days) / f64::from(MAX_BASE_SHELF_LIFE_DAYS) * 100.0;

    freshness * FRESHNESS_WEIGHT
        + ripeness * RIPENESS_WEIGHT
        + normalized_shelf_life * SHELF_LIFE_WEIGHT
}

/// Classify the overall condition from the quality signals and shelf life
pub fn classify_condition(freshness: f64, ripeness: f64, shelf_life_days: u32) -> ConditionLevel {
    ConditionLevel::from_score(condition_score(freshness, ripeness, shelf_life_days))
}

// ============================================================================
// Recommendations
// ============================================================================

fn freshness_recommendations(freshness: f64) -> [&'static str; 2] {
    if freshness >= 90.0 {
        [
            "Premium quality - perfect for high-end markets",
            "Store in optimal conditions to maintain quality",
        ]
    } else if freshness >= 70.0 {
        [
            "Good quality - suitable for regular retail",
            "Store properly to extend shelf life",
        ]
    } else {
        [
            "Consider quick sale or processing",
            "Monitor closely for spoilage",
        ]
    }
}

fn ripeness_recommendations(ripeness: f64) -> &'static [&'static str] {
    if ripeness > 80.0 {
        &[
            "Fully ripe - best for immediate consumption",
            "Consider discount pricing for quick sale",
        ]
    } else if ripeness < 40.0 {
        &[
            "Not yet ripe - needs time to ripen",
            "Store at room temperature to ripen",
        ]
    } else {
        &["Ideal ripeness level for retail"]
    }
}

/// Storage advice for a fruit type, if there is any
pub fn storage_recommendation(fruit_type: FruitType) -> Option<&'static str> {
    match fruit_type {
        FruitType::Banana | FruitType::Mango => {
            Some("Store at room temperature until ripe, then refrigerate")
        }
        FruitType::Apple | FruitType::Orange | FruitType::Grapes => {
            Some("Refrigerate to extend shelf life")
        }
        FruitType::Strawberry => Some("Keep refrigerated and consume quickly"),
        FruitType::Unknown => None,
    }
}

/// Build recommendations: freshness tier, then ripeness tier, then storage
pub fn recommend(fruit_type: FruitType, freshness: f64, ripeness: f64) -> Vec<String> {
    freshness_recommendations(freshness)
        .into_iter()
        .chain(ripeness_recommendations(ripeness).iter().copied())
        .chain(storage_recommendation(fruit_type))
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Report
// ============================================================================

/// Score a validated input into a full report
pub fn score(input: &QualityInput) -> QualityReport {
    let fruit_type = input.fruit_type();
    let freshness = input.freshness();
    let ripeness = input.ripeness();

    let shelf_life_days = estimate_shelf_life(fruit_type, freshness, ripeness);
    let recommendations = recommend(fruit_type, freshness, ripeness);
    let overall_condition = classify_condition(freshness, ripeness, shelf_life_days);

    QualityReport {
        fruit_type,
        freshness,
        ripeness,
        shelf_life_days,
        overall_condition,
        recommendations,
    }
}

/// Validate raw signals and score them
pub fn score_checked(
    fruit_type: FruitType,
    freshness: f64,
    ripeness: f64,
) -> Result<QualityReport, ValidationError> {
    let input = QualityInput::new(fruit_type, freshness, ripeness)?;
    Ok(score(&input))
}
