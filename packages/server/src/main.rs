use std::sync::Arc;

use anyhow::Context;
use catalog_common::storage::FilesystemFileStore;
use tracing::info;

use catalog_server::config::AppConfig;
use catalog_server::state::AppState;
use catalog_server::{build_router, database, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config = AppConfig::load().context("Failed to load config")?;

    let store = FilesystemFileStore::new(
        config.storage.upload_dir.clone(),
        config.storage.max_file_size,
    )
    .await
    .context("Failed to prepare upload directory")?;

    let db = database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        store: Arc::new(store),
        config,
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
