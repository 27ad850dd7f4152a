//! Validation utilities for quality signals entering the scoring engine
//!
//! Scores are rejected outright when they fall outside 0-100; nothing is clamped.

use thiserror::Error;

/// Lowest accepted freshness or ripeness score
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted freshness or ripeness score
pub const MAX_SCORE: f64 = 100.0;

/// Reasons a quality input is refused before scoring
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be between 0 and 100, got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("Unrecognised fruit type: {0}")]
    UnknownFruitType(String),
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::NotFinite { field } => field,
            ValidationError::UnknownFruitType(_) => "fruit_type",
        }
    }
}

// ============================================================================
// Quality Signal Validations
// ============================================================================

/// Validate that a percentage-style score is finite and within 0-100
pub fn validate_score(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
        return Err(ValidationError::OutOfRange { field, value });
    }
    Ok(())
}

/// Validate freshness score
pub fn validate_freshness(freshness: f64) -> Result<(), ValidationError> {
    validate_score("freshness", freshness)
}

/// Validate ripeness score
pub fn validate_ripeness(ripeness: f64) -> Result<(), ValidationError> {
    validate_score("ripeness", ripeness)
}

/// Validate detector confidence (same 0-100 scale as the quality scores)
pub fn validate_confidence(confidence: f64) -> Result<(), ValidationError> {
    validate_score("confidence", confidence)
}
