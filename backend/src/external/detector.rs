//! Fruit type and quality signal detection
//!
//! There is no trained classifier yet. [`RandomDetector`] samples plausible
//! signals so the rest of the pipeline can run end to end; anything that
//! implements [`QualityDetector`] can replace it.

use std::sync::{Mutex, PoisonError};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use shared::FruitType;

use super::image_processor::ImageFeatures;

/// Relative likelihood of each fruit being reported
pub const FRUIT_WEIGHTS: [(FruitType, f64); 6] = [
    (FruitType::Apple, 0.3),
    (FruitType::Banana, 0.2),
    (FruitType::Orange, 0.2),
    (FruitType::Mango, 0.15),
    (FruitType::Grapes, 0.1),
    (FruitType::Strawberry, 0.05),
];

/// Raw signals reported by a detector for one image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub fruit_type: FruitType,
    /// 0-100
    pub confidence: f64,
    /// 0-100
    pub freshness: f64,
    /// 0-100
    pub ripeness: f64,
}

/// Source of fruit type and quality signals for an image
pub trait QualityDetector: Send + Sync {
    fn detect(&self, features: &ImageFeatures) -> Detection;
}

/// Weighted random detector
pub struct RandomDetector {
    rng: Mutex<StdRng>,
}

impl RandomDetector {
    /// Seeded detectors repeat the same sequence of detections
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl QualityDetector for RandomDetector {
    fn detect(&self, _features: &ImageFeatures) -> Detection {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let fruit_type = FRUIT_WEIGHTS
            .choose_weighted(&mut *rng, |(_, weight)| *weight)
            .map(|(fruit, _)| *fruit)
            .unwrap_or(FruitType::Unknown);

        Detection {
            fruit_type,
            confidence: round2(rng.gen_range(80.0..=99.0)),
            freshness: round2(rng.gen_range(70.0..=100.0)),
            ripeness: round2(rng.gen_range(30.0..=100.0)),
        }
    }
}

/// Always reports the same detection
#[derive(Debug, Clone, Copy)]
pub struct FixedDetector {
    detection: Detection,
}

impl FixedDetector {
    pub fn new(detection: Detection) -> Self {
        Self { detection }
    }
}

impl QualityDetector for FixedDetector {
    fn detect(&self, _features: &ImageFeatures) -> Detection {
        self.detection
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
