//! HTTP server for dayflowd.

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::DaemonConfig;
use crate::llm::LlmClient;
use crate::routes;
use crate::store::DataStore;

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<RwLock<DataStore>>,
    pub llm: LlmClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: &DaemonConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(DataStore::new())),
            llm: LlmClient::new(&config.llm),
            start_time: Instant::now(),
        }
    }
}

/// Build the full router. Separate from `run` so tests can drive it
/// without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::goal_routes())
        .merge(routes::task_routes())
        .merge(routes::suggestion_routes())
        .merge(routes::ai_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until the process is stopped.
pub async fn run(config: DaemonConfig) -> Result<()> {
    let state = Arc::new(AppState::new(&config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("  Listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
