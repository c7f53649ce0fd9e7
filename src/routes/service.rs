//! Service maintenance routes.
//!
//! GET  /health  - Liveness check
//! POST /refresh - Drop the cached order snapshot so the next request refetches

use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use tracing::info;

use crate::models::{ApiResponse, RefreshResponse};
use crate::state::AppState;

/// Build the service router.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/refresh", post(refresh))
}

async fn health() -> &'static str {
    "ok"
}

async fn refresh(Extension(state): Extension<AppState>) -> Json<ApiResponse<RefreshResponse>> {
    let invalidated = state.cache.invalidate().await;
    info!("Order snapshot invalidated (held: {})", invalidated);

    Json(ApiResponse {
        data: RefreshResponse { invalidated },
        message: "Order snapshot will be reloaded on next request".to_string(),
    })
}
