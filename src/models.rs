//! Domain models for the sales dashboard.
//!
//! `RawRow` is what the data source hands over: every column as an optional
//! string. `OrderRecord` is the typed, cleaned form produced by the row
//! normalizer and consumed by every aggregation in `report`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::report::filters::OrderFilters;

// ============================================================================
// Source Rows
// ============================================================================

/// One spreadsheet row before cleaning. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub sale_date: Option<String>,
    pub experience_date: Option<String>,
    pub total: Option<String>,
    pub item_id: Option<String>,
    pub order_id: Option<String>,
    pub order_code: Option<String>,
    pub order_status: Option<String>,
    pub client_name: Option<String>,
    pub experience: Option<String>,
    pub channel: Option<String>,
    pub campaign: Option<String>,
    pub origin: Option<String>,
    pub region: Option<String>,
    pub purchase_state: Option<String>,
}

// ============================================================================
// Order Records
// ============================================================================

/// A cleaned order row.
///
/// Malformed fields are `None`; the row itself is always kept. `item_id` is
/// numeric because the dashboard sums it as the "tickets" quantity even
/// though the column is named like an identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub sale_date: Option<NaiveDate>,
    pub experience_date: Option<NaiveDate>,
    pub total: Option<f64>,
    pub item_id: Option<f64>,
    pub order_id: Option<String>,
    pub order_code: Option<String>,
    /// Lowercased; an absent status is the empty string.
    pub order_status: String,
    pub client_name: Option<String>,
    pub experience: Option<String>,
    pub channel: Option<String>,
    pub campaign: Option<String>,
    pub origin: Option<String>,
    pub region: Option<String>,
    pub purchase_state: Option<String>,
}

/// Which date column drives window selection and the daily series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateColumn {
    #[default]
    SaleDate,
    ExperienceDate,
}

impl OrderRecord {
    pub fn date(&self, column: DateColumn) -> Option<NaiveDate> {
        match column {
            DateColumn::SaleDate => self.sale_date,
            DateColumn::ExperienceDate => self.experience_date,
        }
    }
}

// ============================================================================
// Dashboard Tabs
// ============================================================================

/// A dashboard tab. Each tab selects which report sections get computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// Headline metrics, comparisons and the daily series.
    Overview,
    /// The filtered detail rows.
    Details,
    /// Channel, campaign, origin, state and region breakdowns.
    Marketing,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Details, Tab::Marketing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Details => "details",
            Tab::Marketing => "marketing",
        }
    }

    pub fn parse(name: &str) -> Option<Tab> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

// ============================================================================
// Request Models (Deserialize from JSON input)
// ============================================================================

/// Request body for computing a report or an export.
///
/// Omitted bounds fall back to the earliest/latest reference date in the
/// filtered data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub date_column: DateColumn,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub filters: OrderFilters,
    pub tab: Option<Tab>,
}

// ============================================================================
// Response Models
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

/// Response for a cache refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub invalidated: bool,
}
