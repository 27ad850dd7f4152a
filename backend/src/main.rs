//! Fruit Quality Analysis - server entry point

use fqa_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fqa_server=debug,fqa_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Fruit Quality Analysis Server");
    tracing::info!("Environment: {}", config.environment);

    if config.upload.persist {
        tokio::fs::create_dir_all(&config.upload.dir).await?;
        tracing::info!("Persisting uploads to {}", config.upload.dir.display());
    }

    if let Some(seed) = config.detector.seed {
        tracing::warn!("Detector seeded with {}; detections are reproducible", seed);
    }

    let host = config.server.host.clone();
    let port = config.server.port;

    // Build application
    let app = create_app(AppState::new(config));

    // Start server
    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
