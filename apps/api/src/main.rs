mod config;
mod errors;
mod llm_client;
mod optimize;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::selector::resolve_handle;
use crate::llm_client::{GeminiClient, GenerativeBackend};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first. A missing GEMINI_API_KEY is not fatal here;
    // it surfaces per-request as MissingCredential.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Polish API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Gemini client
    let llm: Arc<dyn GenerativeBackend> = Arc::new(GeminiClient::new());

    // Resolve the active model up front. Failure is logged, not fatal:
    // every request re-attempts selection before giving up.
    let model = Arc::new(RwLock::new(None));
    match resolve_handle(llm.as_ref(), config.gemini_api_key.as_deref(), &model).await {
        Ok(handle) => info!("Activated model: {}", handle.id()),
        Err(e) => warn!("No model activated at startup: {e}"),
    }

    // Build app state
    let state = AppState {
        llm,
        model,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
