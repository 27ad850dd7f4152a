//! Quality inputs, reports and the API-facing analysis response

use serde::{Deserialize, Serialize};

use super::fruit::{ConditionLevel, FruitType};
use crate::validation::{validate_freshness, validate_ripeness, ValidationError};

/// Validated quality signals for a single fruit.
///
/// Only constructible through [`QualityInput::new`], so a value of this type
/// always carries scores within 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityInput {
    fruit_type: FruitType,
    freshness: f64,
    ripeness: f64,
}

impl QualityInput {
    pub fn new(fruit_type: FruitType, freshness: f64, ripeness: f64) -> Result<Self, ValidationError> {
        validate_freshness(freshness)?;
        validate_ripeness(ripeness)?;
        Ok(Self {
            fruit_type,
            freshness,
            ripeness,
        })
    }

    pub fn fruit_type(&self) -> FruitType {
        self.fruit_type
    }

    pub fn freshness(&self) -> f64 {
        self.freshness
    }

    pub fn ripeness(&self) -> f64 {
        self.ripeness
    }
}

/// Quality report produced by the scoring engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub fruit_type: FruitType,
    pub freshness: f64,
    pub ripeness: f64,
    /// Always at least one day
    pub shelf_life_days: u32,
    pub overall_condition: ConditionLevel,
    /// Freshness advice, then ripeness advice, then storage advice
    pub recommendations: Vec<String>,
}

/// Report as returned by the image analysis endpoint, with percentage strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub fruit_type: FruitType,
    pub confidence: String,
    pub freshness: String,
    pub ripeness: String,
    pub shelf_life_days: u32,
    pub overall_condition: ConditionLevel,
    pub recommendations: Vec<String>,
}

impl AnalysisResponse {
    /// Combine an engine report with the detector's confidence
    pub fn from_report(report: QualityReport, confidence: f64) -> Self {
        Self {
            fruit_type: report.fruit_type,
            confidence: format_percentage(confidence),
            freshness: format_percentage(report.freshness),
            ripeness: format_percentage(report.ripeness),
            shelf_life_days: report.shelf_life_days,
            overall_condition: report.overall_condition,
            recommendations: report.recommendations,
        }
    }
}

/// Format a 0-100 score as an integer percentage, rounding half to even ("97%")
pub fn format_percentage(value: f64) -> String {
    format!("{}%", value.round_ties_even() as i64)
}
