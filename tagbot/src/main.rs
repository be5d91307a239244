//! tagbot - audio tag edit assistant
//!
//! Receives chat events from a transport adapter over HTTP, drives the
//! per-user edit workflow, and hands back reply payloads plus finished
//! files for delivery.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tagbot::editor::Editor;
use tagbot::fetch::HttpAssetSource;
use tagbot::workspace::Workspace;
use tagbot::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting tagbot (audio tag edit assistant)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Resolve configuration (env overrides the optional TOML file)
    let toml_config = tagbot_common::config::load_toml_config()?;
    let config = tagbot_common::config::ServiceConfig::resolve(None, toml_config)?;
    info!("Workspace root: {}", config.workspace_root.display());

    // Provision the workspace layout; an unwritable root is fatal
    let workspace = Workspace::new(config.workspace_root.clone());
    workspace
        .ensure_layout()
        .map_err(|e| anyhow::anyhow!("Failed to initialize workspace root: {}", e))?;

    // Open or create the database
    let db_path = config.workspace_root.join("tagbot.db");
    info!("Database: {}", db_path.display());
    let db_pool = tagbot::db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    // Asset fetcher for transport file references
    let source = Arc::new(HttpAssetSource::new(
        config.transport_api_base.clone(),
        config.transport_token.clone(),
        config.fetch_timeout_secs,
    )?);

    let editor = Arc::new(Editor::new(
        db_pool.clone(),
        source,
        workspace,
        config.max_audio_bytes,
    ));

    let state = AppState::new(db_pool, editor);
    let app = tagbot::build_router(state);

    let addr = format!("127.0.0.1:{}", config.bind_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
