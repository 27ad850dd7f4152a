//! Business logic services for the Fruit Quality Analysis service

pub mod analysis;

pub use analysis::{AnalysisService, ImageUpload};
