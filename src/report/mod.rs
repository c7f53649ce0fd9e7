//! # Report Pipeline
//!
//! Turns the cached order set plus one `ReportRequest` into everything a
//! dashboard tab renders. Each request runs the whole pass from scratch:
//!
//! 1. `status`: keep approved orders
//! 2. `filters`: apply the user's multi-select choices
//! 3. `period`: resolve the current, previous and year-over-year windows
//! 4. `metrics`: headline numbers for each window
//! 5. `compare`: current against both baselines
//! 6. `breakdown`: daily series and category tables over the current window
//!
//! Nothing in this module fails. Empty inputs produce zero-valued output.

pub mod breakdown;
pub mod compare;
pub mod export;
pub mod filters;
pub mod metrics;
pub mod normalize;
pub mod period;
pub mod status;

use serde::Serialize;
use tracing::debug;

use crate::models::{DateColumn, OrderRecord, ReportRequest, Tab};
use breakdown::{CategoryBreakdown, DailyPoint, GroupMetrics, MARKETING_DIMENSIONS};
use compare::Comparison;
use filters::Dimension;
use metrics::MetricsSnapshot;
use export::DetailRow;
use period::{date_bounds, select_in, PeriodSet};

/// Headline metrics for the three windows and how the current one compares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub current: MetricsSnapshot,
    pub previous: MetricsSnapshot,
    pub year_over_year: MetricsSnapshot,
    pub vs_previous: Comparison,
    pub vs_year_over_year: Comparison,
    pub daily: Vec<DailyPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marketing {
    pub breakdowns: Vec<CategoryBreakdown>,
    pub campaigns: Vec<GroupMetrics>,
}

/// One computed report. Sections for tabs that were not requested are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub date_column: DateColumn,
    /// `None` when no bounds were given and no record carries a reference date.
    pub periods: Option<PeriodSet>,
    pub record_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<Overview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<DetailRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing: Option<Marketing>,
}

/// The record subsets one pass works on.
pub struct Subsets {
    pub periods: Option<PeriodSet>,
    pub current: Vec<OrderRecord>,
    pub previous: Vec<OrderRecord>,
    pub year_over_year: Vec<OrderRecord>,
}

/// Runs status filter, user filters and period resolution.
///
/// Missing bounds default to the earliest and latest reference date among the
/// filtered records.
pub fn select(records: &[OrderRecord], request: &ReportRequest) -> Subsets {
    let approved = status::approved_only(records);
    let filtered = request.filters.apply(&approved);
    let column = request.date_column;

    let bounds = date_bounds(&filtered, column);
    let start = request.start_date.or(bounds.map(|(lo, _)| lo));
    let end = request.end_date.or(bounds.map(|(_, hi)| hi));

    let periods = match (start, end) {
        (Some(start), Some(end)) => Some(PeriodSet::resolve(start, end)),
        _ => None,
    };

    debug!(
        "Selected {} approved of {} records, {} after filters",
        approved.len(),
        records.len(),
        filtered.len()
    );

    match periods {
        Some(periods) => Subsets {
            periods: Some(periods),
            current: periods.current.select(&filtered, column),
            previous: select_in(periods.previous, &filtered, column),
            year_over_year: select_in(periods.year_over_year, &filtered, column),
        },
        None => Subsets {
            periods: None,
            current: Vec::new(),
            previous: Vec::new(),
            year_over_year: Vec::new(),
        },
    }
}

/// Computes the sections for `tabs` over `records`.
pub fn build_report(records: &[OrderRecord], request: &ReportRequest, tabs: &[Tab]) -> Report {
    let subsets = select(records, request);
    let column = request.date_column;
    let wants = |tab: Tab| tabs.contains(&tab);

    let overview = wants(Tab::Overview).then(|| {
        let current = MetricsSnapshot::from_records(&subsets.current);
        let previous = MetricsSnapshot::from_records(&subsets.previous);
        let year_over_year = MetricsSnapshot::from_records(&subsets.year_over_year);
        Overview {
            vs_previous: Comparison::between(&current, &previous),
            vs_year_over_year: Comparison::between(&current, &year_over_year),
            current,
            previous,
            year_over_year,
            daily: breakdown::daily_series(&subsets.current, column),
        }
    });

    let marketing = wants(Tab::Marketing).then(|| Marketing {
        breakdowns: MARKETING_DIMENSIONS
            .iter()
            .map(|dimension| breakdown::category_breakdown(&subsets.current, *dimension))
            .collect(),
        campaigns: breakdown::grouped_metrics(&subsets.current, Dimension::Campaign),
    });

    Report {
        date_column: column,
        periods: subsets.periods,
        record_count: subsets.current.len(),
        overview,
        marketing,
        details: wants(Tab::Details).then(|| export::detail_rows(&subsets.current)),
    }
}
