//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`          - Submission form
//! - `POST /submit`    - Form submission (`GET` redirects to `/`)
//! - `GET  /viewurls`  - List of all short links
//! - `GET  /health`    - Health check
//! - `GET  /{code}`    - Short link redirect
//! - `/static/*`       - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::state::AppState;
use crate::web::handlers::{
    health_handler, index_handler, redirect_handler, submit_handler, submit_redirect_handler,
    view_urls_handler,
};
use crate::web::middleware::tracing;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory served under `/static`
pub fn app_router(state: AppState, static_dir: &str) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/submit", get(submit_redirect_handler).post(submit_handler))
        .route("/viewurls", get(view_urls_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
