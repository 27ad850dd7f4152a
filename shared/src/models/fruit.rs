//! Fruit and condition classifications

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Fruit types recognised by the analysis pipeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FruitType {
    Apple,
    Banana,
    Orange,
    Mango,
    Grapes,
    Strawberry,
    Unknown,
}

impl FruitType {
    /// Every fruit with a known base shelf life
    pub const KNOWN: [FruitType; 6] = [
        FruitType::Apple,
        FruitType::Banana,
        FruitType::Orange,
        FruitType::Mango,
        FruitType::Grapes,
        FruitType::Strawberry,
    ];

    /// Base shelf life in days under ideal freshness and ripeness.
    /// Unknown fruit falls back to a week.
    pub const fn base_shelf_life_days(&self) -> u32 {
        match self {
            FruitType::Apple => 21,
            FruitType::Banana => 7,
            FruitType::Orange => 14,
            FruitType::Mango => 10,
            FruitType::Grapes => 14,
            FruitType::Strawberry => 5,
            FruitType::Unknown => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FruitType::Apple => "Apple",
            FruitType::Banana => "Banana",
            FruitType::Orange => "Orange",
            FruitType::Mango => "Mango",
            FruitType::Grapes => "Grapes",
            FruitType::Strawberry => "Strawberry",
            FruitType::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for FruitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FruitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apple" => Ok(FruitType::Apple),
            "banana" => Ok(FruitType::Banana),
            "orange" => Ok(FruitType::Orange),
            "mango" => Ok(FruitType::Mango),
            "grapes" => Ok(FruitType::Grapes),
            "strawberry" => Ok(FruitType::Strawberry),
            "unknown" => Ok(FruitType::Unknown),
            _ => Err(ValidationError::UnknownFruitType(s.to_string())),
        }
    }
}

/// Overall condition tier, ordered from worst to best
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConditionLevel {
    /// score < 25
    Spoiled,
    /// 25 <= score < 50
    Poor,
    /// 50 <= score < 75
    Fair,
    /// 75 <= score < 90
    Good,
    /// score >= 90
    Excellent,
}

impl ConditionLevel {
    /// Map a composite condition score to its tier.
    ///
    /// Thresholds are inclusive at their lower bound and compared literally;
    /// the score is not clamped to 0-100 first.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            ConditionLevel::Excellent
        } else if score >= 75.0 {
            ConditionLevel::Good
        } else if score >= 50.0 {
            ConditionLevel::Fair
        } else if score >= 25.0 {
            ConditionLevel::Poor
        } else {
            ConditionLevel::Spoiled
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionLevel::Excellent => "Excellent",
            ConditionLevel::Good => "Good",
            ConditionLevel::Fair => "Fair",
            ConditionLevel::Poor => "Poor",
            ConditionLevel::Spoiled => "Spoiled",
        }
    }
}

impl std::fmt::Display for ConditionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fruit_parsing_is_case_insensitive() {
        assert_eq!("apple".parse::<FruitType>().unwrap(), FruitType::Apple);
        assert_eq!(" Grapes ".parse::<FruitType>().unwrap(), FruitType::Grapes);
        assert_eq!("STRAWBERRY".parse::<FruitType>().unwrap(), FruitType::Strawberry);
        assert!(matches!(
            "kiwi".parse::<FruitType>(),
            Err(ValidationError::UnknownFruitType(name)) if name == "kiwi"
        ));
    }

    #[test]
    fn test_condition_ordering() {
        assert!(ConditionLevel::Excellent > ConditionLevel::Good);
        assert!(ConditionLevel::Good > ConditionLevel::Fair);
        assert!(ConditionLevel::Fair > ConditionLevel::Poor);
        assert!(ConditionLevel::Poor > ConditionLevel::Spoiled);
    }

    #[test]
    fn test_serialized_names_match_display() {
        for fruit in FruitType::KNOWN {
            let json = serde_json::to_string(&fruit).unwrap();
            assert_eq!(json, format!("\"{}\"", fruit));
        }
        assert_eq!(
            serde_json::to_string(&ConditionLevel::Spoiled).unwrap(),
            "\"Spoiled\""
        );
    }
}
