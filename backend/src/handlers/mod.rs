//! HTTP handlers for the Fruit Quality Analysis service

mod analysis;
mod health;
mod scoring;

pub use analysis::analyze_image;
pub use health::{health_check, root, HealthResponse};
pub use scoring::{score_quality, ScoreRequest};

use axum::http::Uri;

use crate::error::AppError;

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!("No route for {}", uri.path());
    AppError::NotFound("Endpoint".to_string())
}
