//! Punchcard - time-clock punch recorder
//!
//! Main entry point for the HTTP service.

use std::sync::Arc;

use anyhow::Context as _;
use punchcard_api::utils::logging::init_tracing;
use punchcard_api::{router, AppContext};
use punchcard_infra::config;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging first so .env loading is visible
    init_tracing();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => warn!(error = %e, "no .env file loaded"),
    }

    let config = config::load().context("loading configuration")?;
    let bind_addr = config.server.bind_addr.clone();
    let context = Arc::new(AppContext::new(config).context("initializing application context")?);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    info!(%bind_addr, "punchcard listening");

    axum::serve(listener, router(context)).await.context("serving HTTP")?;
    Ok(())
}
