//! Row normalizer: raw string rows into typed `OrderRecord`s.
//!
//! Nothing here fails. A field that does not parse becomes `None` and the row
//! is kept.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::models::{OrderRecord, RawRow};

/// Day-first layouts accepted for date cells, tried in order. Time parts are
/// dropped; only the calendar day is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%d/%m/%y"];

pub fn normalize_rows(rows: Vec<RawRow>) -> Vec<OrderRecord> {
    let records: Vec<OrderRecord> = rows.into_iter().map(normalize_row).collect();

    let undated = records.iter().filter(|r| r.sale_date.is_none()).count();
    let unpriced = records.iter().filter(|r| r.total.is_none()).count();
    debug!(
        "Normalized {} rows ({} without sale date, {} without total)",
        records.len(),
        undated,
        unpriced
    );

    records
}

pub fn normalize_row(row: RawRow) -> OrderRecord {
    OrderRecord {
        sale_date: row.sale_date.as_deref().and_then(parse_day_first),
        experience_date: row.experience_date.as_deref().and_then(parse_day_first),
        total: row.total.as_deref().and_then(parse_amount),
        item_id: row.item_id.as_deref().and_then(parse_number),
        order_id: clean_text(row.order_id),
        order_code: clean_text(row.order_code),
        order_status: row
            .order_status
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default(),
        client_name: clean_text(row.client_name),
        experience: clean_text(row.experience),
        channel: clean_text(row.channel),
        campaign: clean_text(row.campaign),
        origin: clean_text(row.origin),
        region: clean_text(row.region),
        purchase_state: clean_text(row.purchase_state),
    }
}

/// Parses a date written day first (`01/04/2025`, `01/04/2025 14:30`).
/// ISO dates are also accepted since they cannot be read ambiguously.
pub fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        })
}

/// Parses a monetary amount.
///
/// When a comma is present it is the decimal separator and dots are thousands
/// separators (`1.234,56`). Otherwise the text is read as a plain decimal. A
/// leading `R$` is tolerated.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let raw = raw.strip_prefix("R$").unwrap_or(raw).trim();

    if raw.contains(',') {
        parse_number(&raw.replace('.', "").replace(',', "."))
    } else {
        parse_number(raw)
    }
}

pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
