mod advisor;
mod config;
mod dashboard;
mod errors;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor::roadmap::RoadmapSettings;
use crate::advisor::GeminiAdvisor;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::{open_store, SessionController};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Path Finder v{}", env!("CARGO_PKG_VERSION"));

    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY (or API_KEY) is not set. Requests will fail until it is provided.");
    }

    // Initialize LLM client and advisor
    let llm = LlmClient::new(
        config.api_base.clone(),
        config.api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    let advisor = GeminiAdvisor::new(
        llm,
        RoadmapSettings {
            model: config.roadmap_model.clone(),
            thinking_budget: config.thinking_budget,
            max_depth: config.roadmap_max_depth,
        },
        config.search_model.clone(),
    );
    info!(
        roadmap_model = %config.roadmap_model,
        search_model = %config.search_model,
        max_depth = config.roadmap_max_depth,
        "Advisor initialized"
    );

    // Restore the login flag
    let store = open_store(&config.session_backend)?;
    info!("Session store: {}", config.session_backend.describe());
    let session = SessionController::load(store).await?;

    let state = AppState {
        advisor: Arc::new(advisor),
        session: Arc::new(session),
        dashboard: Arc::new(Dashboard::default()),
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
