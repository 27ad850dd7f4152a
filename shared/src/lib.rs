//! Shared types and scoring for the Fruit Quality Analysis service
//!
//! This crate contains the domain model and the deterministic quality engine,
//! used by the backend and by the browser (via WASM).

pub mod models;
pub mod quality;
pub mod validation;

pub use models::*;
pub use quality::*;
pub use validation::*;
