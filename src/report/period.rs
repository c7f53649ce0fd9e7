//! Period resolver: the current window and its two comparison baselines.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{DateColumn, OrderRecord};

/// Fixed year-over-year offset. Leap years are not adjusted for.
pub const YEAR_OVER_YEAR_DAYS: i64 = 365;

/// Closed date range, inclusive on both ends. A window whose end precedes its
/// start contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Length in days minus one; `0` for a single-day window.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The window moved `days` into the past, or `None` when either bound
    /// would fall before the earliest representable date.
    pub fn shift_back(&self, days: i64) -> Option<Window> {
        let offset = Duration::days(days);
        Some(Window {
            start: self.start.checked_sub_signed(offset)?,
            end: self.end.checked_sub_signed(offset)?,
        })
    }

    /// Records whose reference date falls in the window. Undated records never
    /// match.
    pub fn select(&self, records: &[OrderRecord], column: DateColumn) -> Vec<OrderRecord> {
        if self.is_empty() {
            return Vec::new();
        }
        records
            .iter()
            .filter(|r| r.date(column).is_some_and(|d| self.contains(d)))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodSet {
    pub current: Window,
    /// `None` when the shifted window is out of the calendar's range; it then
    /// selects nothing.
    pub previous: Option<Window>,
    pub year_over_year: Option<Window>,
}

impl PeriodSet {
    /// Derives the comparison windows for `[start, end]`.
    ///
    /// The previous window is shifted back by `span_days + 1` so it ends the
    /// day before `start` and has the same length.
    pub fn resolve(start: NaiveDate, end: NaiveDate) -> Self {
        let current = Window::new(start, end);
        Self {
            current,
            previous: current.shift_back(current.span_days() + 1),
            year_over_year: current.shift_back(YEAR_OVER_YEAR_DAYS),
        }
    }
}

/// Records in `window`; nothing when there is no window.
pub fn select_in(window: Option<Window>, records: &[OrderRecord], column: DateColumn) -> Vec<OrderRecord> {
    window
        .map(|w| w.select(records, column))
        .unwrap_or_default()
}

/// Earliest and latest reference dates, used when a request omits its bounds.
pub fn date_bounds(records: &[OrderRecord], column: DateColumn) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = records.iter().filter_map(|r| r.date(column));
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sold_on(d: Option<NaiveDate>) -> OrderRecord {
        OrderRecord {
            sale_date: d,
            ..Default::default()
        }
    }

    #[test]
    fn april_windows() {
        let periods = PeriodSet::resolve(date(2025, 4, 1), date(2025, 4, 30));

        assert_eq!(periods.current.span_days(), 29);
        assert_eq!(
            periods.previous,
            Some(Window::new(date(2025, 3, 2), date(2025, 3, 31)))
        );
        assert_eq!(
            periods.year_over_year,
            Some(Window::new(date(2024, 4, 1), date(2024, 4, 30)))
        );
    }

    #[test]
    fn single_day_previous_is_the_day_before() {
        let periods = PeriodSet::resolve(date(2025, 1, 1), date(2025, 1, 1));
        assert_eq!(
            periods.previous,
            Some(Window::new(date(2024, 12, 31), date(2024, 12, 31)))
        );
    }

    #[test]
    fn year_over_year_ignores_leap_day() {
        let periods = PeriodSet::resolve(date(2024, 3, 1), date(2024, 3, 1));
        assert_eq!(periods.year_over_year.unwrap().start, date(2023, 3, 2));
    }

    #[test]
    fn inverted_range_selects_nothing() {
        let periods = PeriodSet::resolve(date(2025, 4, 30), date(2025, 4, 1));
        let records = vec![sold_on(Some(date(2025, 4, 15))), sold_on(Some(date(2025, 3, 15)))];

        for window in [periods.current, periods.previous.unwrap(), periods.year_over_year.unwrap()] {
            assert!(window.is_empty());
            assert!(window.select(&records, DateColumn::SaleDate).is_empty());
        }
    }

    #[test]
    fn baselines_before_the_calendar_start_are_absent() {
        let start = NaiveDate::MIN + Duration::days(10);
        let periods = PeriodSet::resolve(start, start + Duration::days(30));

        assert_eq!(periods.current.start, start);
        assert_eq!(periods.previous, None);
        assert_eq!(periods.year_over_year, None);

        let records = vec![sold_on(Some(start)), sold_on(Some(NaiveDate::MIN))];
        assert_eq!(periods.current.select(&records, DateColumn::SaleDate).len(), 1);
        assert!(select_in(periods.previous, &records, DateColumn::SaleDate).is_empty());
    }

    #[test]
    fn span_wider_than_half_the_calendar() {
        let start = NaiveDate::from_ymd_opt(-262000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(262000, 12, 31).unwrap();
        let periods = PeriodSet::resolve(start, end);

        assert_eq!(periods.previous, None);
        assert_eq!(
            periods.year_over_year,
            Some(Window::new(start - Duration::days(365), end - Duration::days(365)))
        );
    }

    #[test]
    fn late_dates_shift_without_overflow() {
        let end = NaiveDate::MAX;
        let periods = PeriodSet::resolve(end - Duration::days(6), end);
        assert_eq!(periods.previous.unwrap().end, end - Duration::days(7));
    }

    #[test]
    fn selection_is_inclusive_and_skips_undated() {
        let window = Window::new(date(2025, 4, 1), date(2025, 4, 30));
        let records = vec![
            sold_on(Some(date(2025, 4, 1))),
            sold_on(Some(date(2025, 4, 30))),
            sold_on(Some(date(2025, 5, 1))),
            sold_on(Some(date(2025, 3, 31))),
            sold_on(None),
        ];

        let selected = window.select(&records, DateColumn::SaleDate);
        assert_eq!(selected.len(), 2);
        assert!(window.select(&records, DateColumn::ExperienceDate).is_empty());
    }

    #[test]
    fn bounds_over_dated_records() {
        let records = vec![
            sold_on(None),
            sold_on(Some(date(2025, 2, 10))),
            sold_on(Some(date(2024, 11, 3))),
            sold_on(Some(date(2025, 1, 1))),
        ];
        assert_eq!(
            date_bounds(&records, DateColumn::SaleDate),
            Some((date(2024, 11, 3), date(2025, 2, 10)))
        );
        assert_eq!(date_bounds(&records, DateColumn::ExperienceDate), None);
    }
}
