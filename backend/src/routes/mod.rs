//! Route definitions for the Fruit Quality Analysis service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Image upload -> detection -> quality report
        .route("/analyze", post(handlers::analyze_image))
        // Score known signals directly
        .route("/score", post(handlers::score_quality))
}
