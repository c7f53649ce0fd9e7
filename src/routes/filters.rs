//! Filter option routes.
//!
//! GET /filters - Distinct values for each multi-select filter

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tracing::error;

use crate::models::ApiResponse;
use crate::report::filters::FilterOptions;
use crate::report::status::approved_only;
use crate::state::AppState;

/// Build the filters router.
pub fn router() -> Router {
    Router::new().route("/filters", get(list_filter_options))
}

/// Options are drawn from approved orders only, so every choice can match
/// something in a report.
async fn list_filter_options(
    Extension(state): Extension<AppState>,
) -> Result<Json<ApiResponse<FilterOptions>>, StatusCode> {
    let records = state.cache.snapshot().await.map_err(|e| {
        error!("Failed to load order snapshot: {}", e);
        StatusCode::BAD_GATEWAY
    })?;

    Ok(Json(ApiResponse {
        data: FilterOptions::from_records(&approved_only(&records)),
        message: "Filter options retrieved".to_string(),
    }))
}
