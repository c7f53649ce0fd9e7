//! Breakdown aggregator: per-category and per-day groupings.
//!
//! A record missing the grouping value is left out of that one breakdown
//! only. Undated records are left out of the daily series.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::filters::Dimension;
use super::metrics::MetricsSnapshot;
use crate::models::{DateColumn, OrderRecord};

/// Dimensions shown on the marketing tab, in display order.
pub const MARKETING_DIMENSIONS: [Dimension; 5] = [
    Dimension::Channel,
    Dimension::Campaign,
    Dimension::Origin,
    Dimension::PurchaseState,
    Dimension::Region,
];

/// One slice of a categorical distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub record_count: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub dimension: Dimension,
    pub groups: Vec<CategoryCount>,
}

/// Full headline metrics for one category value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMetrics {
    pub label: String,
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub total_value: f64,
}

fn group_by<'a>(
    records: &'a [OrderRecord],
    dimension: Dimension,
) -> HashMap<&'a str, Vec<&'a OrderRecord>> {
    let mut groups: HashMap<&str, Vec<&OrderRecord>> = HashMap::new();
    for record in records {
        if let Some(label) = dimension.value(record) {
            groups.entry(label).or_default().push(record);
        }
    }
    groups
}

/// Row counts and summed totals per category, largest share first.
pub fn category_breakdown(records: &[OrderRecord], dimension: Dimension) -> CategoryBreakdown {
    let mut groups: Vec<CategoryCount> = group_by(records, dimension)
        .into_iter()
        .map(|(label, rows)| CategoryCount {
            label: label.to_string(),
            record_count: rows.len(),
            total_value: rows.iter().filter_map(|r| r.total).sum(),
        })
        .collect();

    groups.sort_by(|a, b| {
        b.record_count
            .cmp(&a.record_count)
            .then_with(|| a.label.cmp(&b.label))
    });

    CategoryBreakdown { dimension, groups }
}

/// Headline metrics per category, sorted by descending total value. This is
/// the campaign table when grouped by `Dimension::Campaign`.
pub fn grouped_metrics(records: &[OrderRecord], dimension: Dimension) -> Vec<GroupMetrics> {
    let mut rows: Vec<GroupMetrics> = group_by(records, dimension)
        .into_iter()
        .map(|(label, rows)| GroupMetrics {
            label: label.to_string(),
            metrics: MetricsSnapshot::from_records(rows),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.metrics
            .total_value
            .total_cmp(&a.metrics.total_value)
            .then_with(|| a.label.cmp(&b.label))
    });
    rows
}

/// Summed total per calendar day, in chronological order.
pub fn daily_series(records: &[OrderRecord], column: DateColumn) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        if let Some(date) = record.date(column) {
            *days.entry(date).or_insert(0.0) += record.total.unwrap_or(0.0);
        }
    }

    days.into_iter()
        .map(|(date, total_value)| DailyPoint { date, total_value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn sale(day: u32, campaign: Option<&str>, order_id: &str, total: f64, items: f64) -> OrderRecord {
        OrderRecord {
            sale_date: Some(date(day)),
            campaign: campaign.map(String::from),
            order_id: Some(order_id.to_string()),
            total: Some(total),
            item_id: Some(items),
            channel: Some("site".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn null_campaign_only_leaves_campaign_breakdown() {
        let records = vec![
            sale(1, Some("verao"), "A", 100.0, 1.0),
            sale(2, None, "B", 50.0, 1.0),
        ];

        let campaigns = category_breakdown(&records, Dimension::Campaign);
        assert_eq!(campaigns.groups.len(), 1);
        assert_eq!(campaigns.groups[0].label, "verao");

        let channels = category_breakdown(&records, Dimension::Channel);
        assert_eq!(channels.groups[0].record_count, 2);

        let daily = daily_series(&records, DateColumn::SaleDate);
        assert_eq!(
            daily,
            vec![
                DailyPoint { date: date(1), total_value: 100.0 },
                DailyPoint { date: date(2), total_value: 50.0 },
            ]
        );
    }

    #[test]
    fn campaign_table_sorted_by_value() {
        let records = vec![
            sale(1, Some("inverno"), "A", 40.0, 2.0),
            sale(1, Some("verao"), "B", 300.0, 3.0),
            sale(3, Some("verao"), "B", 100.0, 1.0),
            sale(2, Some("pascoa"), "C", 0.0, 0.0),
        ];

        let table = grouped_metrics(&records, Dimension::Campaign);
        let labels: Vec<&str> = table.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["verao", "inverno", "pascoa"]);

        let verao = &table[0].metrics;
        assert_eq!(verao.total_value, 400.0);
        assert_eq!(verao.purchase_count, 1);
        assert_eq!(verao.item_count, 4.0);
        assert_eq!(verao.average_value, 100.0);
        assert_eq!(table[2].metrics.average_value, 0.0);
    }

    #[test]
    fn daily_series_sums_same_day_and_skips_undated() {
        let mut undated = sale(1, None, "Z", 999.0, 1.0);
        undated.sale_date = None;
        let records = vec![
            sale(5, None, "A", 10.0, 1.0),
            sale(3, None, "B", 20.0, 1.0),
            sale(5, None, "C", 5.5, 1.0),
            undated,
        ];

        let daily = daily_series(&records, DateColumn::SaleDate);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, date(3));
        assert_eq!(daily[1].total_value, 15.5);
    }
}
