//! Wedding invitation backend
//!
//! RSVP and guest-wish REST service with SQLite persistence, plus the typed
//! client and form controllers that drive it.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod service;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use config::Config;
use db::Repository;
use service::{QueryService, SubmissionService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub submissions: SubmissionService,
    pub queries: QueryService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the services around one store handle.
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        Self {
            submissions: SubmissionService::new(repo.clone()),
            queries: QueryService::new(repo),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes; other methods on these paths answer 405
    let api_routes = Router::new()
        .route("/rsvp", get(api::list_rsvps).post(api::create_rsvp))
        .route("/rsvp/stats", get(api::rsvp_stats))
        .route("/wishes", get(api::list_wishes).post(api::create_wish))
        .route("/files/{filename}", get(api::get_file));

    // Everything else is a static site asset
    let assets = ServeDir::new(&state.config.public_dir).append_index_html_on_directories(true);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .fallback_service(assets)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
