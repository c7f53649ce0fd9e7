//! Report and export routes.
//!
//! POST /report - Compute the dashboard sections for a date range and filters
//! POST /export - Download the detail rows for the same request as CSV

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Extension, Json, Router};
use tracing::{error, info, warn};

use crate::models::{ApiResponse, ReportRequest, Tab};
use crate::report::{self, export, Report};
use crate::state::AppState;

pub const EXPORT_FILENAME: &str = "vendas_filtradas.csv";

/// Build the report router.
pub fn router() -> Router {
    Router::new()
        .route("/report", post(create_report))
        .route("/export", post(export_details))
}

/// Compute a report over the cached order snapshot.
///
/// A request naming a tab gets only that tab's sections; otherwise every tab
/// enabled for this deployment is computed.
async fn create_report(
    Extension(state): Extension<AppState>,
    Json(req): Json<ReportRequest>,
) -> Result<Json<ApiResponse<Report>>, StatusCode> {
    let tabs = state.tabs_for(req.tab).ok_or_else(|| {
        warn!("Report requested for disabled tab {:?}", req.tab);
        StatusCode::NOT_FOUND
    })?;

    let records = state.cache.snapshot().await.map_err(|e| {
        error!("Failed to load order snapshot: {}", e);
        StatusCode::BAD_GATEWAY
    })?;

    let report = report::build_report(&records, &req, &tabs);
    info!(
        "Report computed: {} records in window, tabs {:?}",
        report.record_count, tabs
    );

    Ok(Json(ApiResponse {
        data: report,
        message: "Report computed".to_string(),
    }))
}

/// Export the detail rows of a report request as CSV.
async fn export_details(
    Extension(state): Extension<AppState>,
    Json(req): Json<ReportRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if state.tabs_for(Some(Tab::Details)).is_none() {
        warn!("Export requested but the details tab is disabled");
        return Err(StatusCode::NOT_FOUND);
    }

    let records = state.cache.snapshot().await.map_err(|e| {
        error!("Failed to load order snapshot: {}", e);
        StatusCode::BAD_GATEWAY
    })?;

    let rows = export::detail_rows(&report::select(&records, &req).current);
    let body = export::to_csv(&rows).map_err(|e| {
        error!("Failed to write export CSV: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("Exported {} detail rows", rows.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        body,
    ))
}
