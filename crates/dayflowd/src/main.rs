//! Dayflow Daemon - conversational calendar assistant.
//!
//! Serves the goal/task/suggestion store over HTTP and turns free-text
//! messages into scheduled entities through a local generative backend.

use anyhow::Result;
use dayflowd::config::DaemonConfig;
use dayflowd::server;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Dayflow Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = DaemonConfig::load();
    info!(
        "Model backend: {} ({})",
        config.llm.base_url, config.llm.model
    );

    server::run(config).await
}
