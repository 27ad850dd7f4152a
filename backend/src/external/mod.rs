//! Upstream collaborators of the scoring engine

pub mod detector;
pub mod image_processor;

pub use detector::{Detection, FixedDetector, QualityDetector, RandomDetector};
pub use image_processor::{ImageFeatures, ImageProcessor};
