//! # Sales Dashboard Library
//!
//! Exposes the Axum router and modules so integration tests can create
//! an in-process server backed by an in-memory order sheet.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod routes;
pub mod source;
pub mod state;

use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the Axum router with all route modules and middleware.
///
/// The caller provides the state (snapshot cache and enabled tabs). This
/// function does NOT bind a listener.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::report::router())
        .merge(routes::filters::router())
        .merge(routes::service::router())
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
