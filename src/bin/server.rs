//! Roadsense HTTP Server Binary
//!
//! This is the main entry point for the analysis REST API server.
//! It initializes the repository, optionally preloads a dataset, sets up
//! the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin roadsense-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roadsense::api::AreaDataset;
use roadsense::config::ServerConfig;
use roadsense::db::{calculate_checksum, FullRepository, LocalRepository};
use roadsense::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .init();

    info!("Starting Roadsense HTTP Server");

    let config = ServerConfig::load().context("Failed to load server configuration")?;

    let repository: Arc<dyn FullRepository> = Arc::new(LocalRepository::new());

    if let Some(path) = &config.preload {
        let count = preload_datasets(repository.as_ref(), path)
            .await
            .with_context(|| format!("Failed to preload dataset from {}", path.display()))?;
        info!("Preloaded {} area dataset(s) from {}", count, path.display());
    }

    // Create application state and router
    let state = AppState::new(repository);
    let app = create_router(state);

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_addr()))?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load one `AreaDataset` (or an array of them) from a JSON file into
/// the repository.
async fn preload_datasets(repo: &dyn FullRepository, path: &Path) -> anyhow::Result<usize> {
    let content = tokio::fs::read_to_string(path).await?;

    let datasets: Vec<AreaDataset> = match serde_json::from_str::<Vec<AreaDataset>>(&content) {
        Ok(list) => list,
        Err(_) => vec![serde_json::from_str::<AreaDataset>(&content)?],
    };

    let mut stored = 0;
    for dataset in &datasets {
        let canonical = serde_json::to_string(dataset)?;
        let checksum = calculate_checksum(&canonical);
        repo.store_area_dataset(dataset, &checksum)
            .await
            .map_err(|e| anyhow::anyhow!("dataset '{}': {}", dataset.area_id, e))?;
        stored += 1;
    }
    Ok(stored)
}
