//! Headline metrics over a record subset.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::OrderRecord;

/// The four headline numbers: TPV, purchases, tickets and average ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Sum of `total`, absent totals skipped.
    pub total_value: f64,
    /// Distinct `order_id`s.
    pub purchase_count: usize,
    /// Sum of `item_id`, absent values skipped.
    pub item_count: f64,
    /// `total_value / item_count`, zero when there are no items.
    pub average_value: f64,
}

impl MetricsSnapshot {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut total_value = 0.0;
        let mut item_count = 0.0;
        let mut orders: HashSet<&str> = HashSet::new();

        for record in records {
            total_value += record.total.unwrap_or(0.0);
            item_count += record.item_id.unwrap_or(0.0);
            if let Some(order_id) = record.order_id.as_deref() {
                orders.insert(order_id);
            }
        }

        Self {
            total_value,
            purchase_count: orders.len(),
            item_count,
            average_value: average(total_value, item_count),
        }
    }
}

fn average(total_value: f64, item_count: f64) -> f64 {
    if item_count > 0.0 {
        total_value / item_count
    } else {
        0.0
    }
}
