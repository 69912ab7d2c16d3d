//! safesight library - image safe-search analysis service
//!
//! Accepts image uploads, classifies them through an external vision
//! service, and keeps the results in a local history table with CRUD
//! endpoints over it.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod vision;

pub use error::{Error, Result};

use api::AdminAuth;
use db::Store;
use vision::VisionClient;

/// Largest accepted upload body
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
///
/// Constructed once at startup and cloned into each handler; there is no
/// process-wide singleton. `vision` is None when no credential material
/// was configured, in which case only /analyze is degraded.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub vision: Option<Arc<VisionClient>>,
    pub admin: AdminAuth,
}

impl AppState {
    pub fn new(store: Store, vision: Option<Arc<VisionClient>>, admin: AdminAuth) -> Self {
        Self {
            store,
            vision,
            admin,
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // TODO: restrict allowed origins before any production deployment
    Router::new()
        .route("/", get(api::read_root))
        .route("/analyze", post(api::analyze_image))
        .route("/history", get(api::get_history))
        .route(
            "/analysis/:id",
            get(api::get_analysis).delete(api::delete_analysis),
        )
        .route("/health/db", get(api::health_db))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
