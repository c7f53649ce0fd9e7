//! Comparator: deltas between a current snapshot and a baseline.

use serde::Serialize;

use super::metrics::MetricsSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    TotalValue,
    PurchaseCount,
    ItemCount,
    AverageValue,
}

impl MetricField {
    pub fn value(&self, snapshot: &MetricsSnapshot) -> f64 {
        match self {
            MetricField::TotalValue => snapshot.total_value,
            MetricField::PurchaseCount => snapshot.purchase_count as f64,
            MetricField::ItemCount => snapshot.item_count,
            MetricField::AverageValue => snapshot.average_value,
        }
    }

    pub fn is_monetary(&self) -> bool {
        matches!(self, MetricField::TotalValue | MetricField::AverageValue)
    }
}

/// Result of comparing one metric. The sign of `relative_pct` tells the
/// renderer whether this is an increase or a decrease.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// The baseline was zero, so no percentage exists.
    NotApplicable,
    Delta {
        relative_pct: f64,
        absolute: f64,
        /// Currency rendering of `absolute` for monetary metrics.
        #[serde(skip_serializing_if = "Option::is_none")]
        absolute_display: Option<String>,
    },
}

#[cfg(test)]
impl Change {
    pub fn relative_pct(&self) -> Option<f64> {
        match self {
            Change::NotApplicable => None,
            Change::Delta { relative_pct, .. } => Some(*relative_pct),
        }
    }
}

pub fn compare(field: MetricField, current: &MetricsSnapshot, baseline: &MetricsSnapshot) -> Change {
    let now = field.value(current);
    let before = field.value(baseline);

    if before == 0.0 {
        return Change::NotApplicable;
    }

    let absolute = (now - before).abs();
    Change::Delta {
        relative_pct: (now - before) / before * 100.0,
        absolute,
        absolute_display: field.is_monetary().then(|| format_currency(absolute)),
    }
}

/// All four metrics compared against one baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub total_value: Change,
    pub purchase_count: Change,
    pub item_count: Change,
    pub average_value: Change,
}

impl Comparison {
    pub fn between(current: &MetricsSnapshot, baseline: &MetricsSnapshot) -> Self {
        Self {
            total_value: compare(MetricField::TotalValue, current, baseline),
            purchase_count: compare(MetricField::PurchaseCount, current, baseline),
            item_count: compare(MetricField::ItemCount, current, baseline),
            average_value: compare(MetricField::AverageValue, current, baseline),
        }
    }
}

/// Formats an amount the way the dashboard prints TPV: `R$ 1,234.56`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total_value: f64, purchase_count: usize, item_count: f64) -> MetricsSnapshot {
        MetricsSnapshot {
            total_value,
            purchase_count,
            item_count,
            average_value: if item_count > 0.0 { total_value / item_count } else { 0.0 },
        }
    }

    #[test]
    fn zero_baseline_is_not_applicable() {
        let current = snapshot(500.0, 3, 4.0);
        let comparison = Comparison::between(&current, &MetricsSnapshot::default());

        assert_eq!(comparison.total_value, Change::NotApplicable);
        assert_eq!(comparison.purchase_count, Change::NotApplicable);
        assert_eq!(comparison.item_count, Change::NotApplicable);
        assert_eq!(comparison.average_value, Change::NotApplicable);
    }

    #[test]
    fn increase_is_positive() {
        let change = compare(
            MetricField::TotalValue,
            &snapshot(1500.0, 1, 1.0),
            &snapshot(1000.0, 1, 1.0),
        );
        assert_eq!(
            change,
            Change::Delta {
                relative_pct: 50.0,
                absolute: 500.0,
                absolute_display: Some("R$ 500.00".to_string()),
            }
        );
    }

    #[test]
    fn decrease_is_negative_with_positive_absolute() {
        let change = compare(
            MetricField::PurchaseCount,
            &snapshot(0.0, 3, 0.0),
            &snapshot(0.0, 4, 0.0),
        );
        assert_eq!(
            change,
            Change::Delta {
                relative_pct: -25.0,
                absolute: 1.0,
                absolute_display: None,
            }
        );
    }

    #[test]
    fn current_zero_against_nonzero_baseline() {
        let change = compare(
            MetricField::TotalValue,
            &MetricsSnapshot::default(),
            &snapshot(80.0, 1, 1.0),
        );
        assert_eq!(change.relative_pct(), Some(-100.0));
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(0.0), "R$ 0.00");
        assert_eq!(format_currency(999.999), "R$ 1,000.00");
        assert_eq!(format_currency(1234567.5), "R$ 1,234,567.50");
        assert_eq!(format_currency(-42.1), "-R$ 42.10");
    }
}
