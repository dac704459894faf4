//! Tea Garden Climate Impact Analyzer - Backend Server

use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tsa_server::{config, create_app, AppState, InferenceEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tsa_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Tea Garden Climate Impact Analyzer");
    tracing::info!("Environment: {}", config.environment);

    // Load model artifacts once; they stay read-only for the process lifetime
    tracing::info!("Loading model artifacts...");
    let engine = InferenceEngine::load(&config.artifacts)?;
    tracing::info!(
        classifier = engine.classifier_kind(),
        classes = engine.classes().len(),
        "Model artifacts loaded"
    );

    // Create application state
    let state = AppState {
        engine: Arc::new(engine),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server host '{}': {}", config.server.host, e))?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
