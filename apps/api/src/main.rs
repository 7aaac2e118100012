mod config;
mod document;
mod errors;
mod extraction;
mod llm_client;
mod metering;
mod routes;
mod schema;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::Extractor;
use crate::llm_client::{CompletionService, OpenAiClient};
use crate::routes::build_router;
use crate::schema::EntityKind;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume parser API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the completion client
    let llm: Arc<dyn CompletionService> = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build the extraction orchestrator around the immutable schema registry
    let extractor = Arc::new(Extractor::new(llm, config.max_concurrent_extractions));
    info!(
        "Extractor ready: {} entity kinds, at most {} concurrent completion calls",
        EntityKind::ALL.len(),
        config.max_concurrent_extractions
    );

    // Build app state
    let state = AppState { extractor };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
