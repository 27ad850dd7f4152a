//! Fruit Quality Analysis - Backend Server
//!
//! Accepts fruit images over HTTP and returns a quality report: fruit type,
//! freshness, ripeness, estimated shelf life, overall condition and handling
//! recommendations.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
use external::{QualityDetector, RandomDetector};

/// Room for multipart boundaries and headers on top of the image itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub detector: Arc<dyn QualityDetector>,
}

impl AppState {
    /// State backed by the random detector, seeded from configuration
    pub fn new(config: Config) -> Self {
        let detector = RandomDetector::new(config.detector.seed);
        Self::with_detector(config, Arc::new(detector))
    }

    pub fn with_detector(config: Config, detector: Arc<dyn QualityDetector>) -> Self {
        Self {
            config: Arc::new(config),
            detector,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.upload.max_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(handlers::root))
        .merge(routes::api_routes())
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
