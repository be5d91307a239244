//! tagbot library interface
//!
//! Exposes the edit workflow and the event gateway for the binary and
//! for integration testing.

pub mod api;
pub mod db;
pub mod editor;
pub mod error;
pub mod fetch;
pub mod image;
pub mod session;
pub mod tags;
pub mod workspace;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::editor::Editor;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (per-user stats)
    pub db: SqlitePool,
    /// The edit workflow
    pub editor: Arc<Editor>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, editor: Arc<Editor>) -> Self {
        Self {
            db,
            editor,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::event_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
