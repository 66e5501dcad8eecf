//! Calendar-window totals over fuel spend.
//!
//! Windows are calendar months and years of the record's local date, never
//! rolling "last 30 days" spans.

use chrono::{Datelike, NaiveDateTime};

use crate::analytics::types::MonthlyComparison;
use crate::analytics::utility::pct;
use crate::records::FuelRecord;

pub(crate) fn in_month(date: NaiveDateTime, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// Year and month preceding `now`'s, rolling January back to December.
pub fn previous_month(now: NaiveDateTime) -> (i32, u32) {
    if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    }
}

fn month_total(records: &[FuelRecord], year: i32, month: u32) -> f64 {
    records
        .iter()
        .filter(|r| in_month(r.date, year, month))
        .map(|r| r.total)
        .sum()
}

/// Fuel spend in `now`'s calendar month.
pub fn monthly_expenses(records: &[FuelRecord], now: NaiveDateTime) -> f64 {
    month_total(records, now.year(), now.month())
}

/// Fuel spend in `now`'s calendar year.
pub fn yearly_expenses(records: &[FuelRecord], now: NaiveDateTime) -> f64 {
    records
        .iter()
        .filter(|r| r.date.year() == now.year())
        .map(|r| r.total)
        .sum()
}

pub fn monthly_comparison(records: &[FuelRecord], now: NaiveDateTime) -> MonthlyComparison {
    let current = monthly_expenses(records, now);
    let (year, month) = previous_month(now);
    let previous = month_total(records, year, month);

    MonthlyComparison {
        current,
        previous,
        change: pct(current - previous, previous),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{approx, dt, fill};

    #[test]
    fn test_empty_totals() {
        let now = dt("2024-06-15");
        assert_eq!(monthly_expenses(&[], now), 0.0);
        assert_eq!(yearly_expenses(&[], now), 0.0);
        assert_eq!(monthly_comparison(&[], now), MonthlyComparison::default());
    }

    #[test]
    fn test_month_and_year_windows() {
        let records = vec![
            fill("2024-06-01 00:00", 1000, 10.0, 40.0),
            fill("2024-06-30 23:59", 1300, 10.0, 35.0),
            fill("2024-05-31 23:59", 900, 10.0, 20.0),
            fill("2023-06-15", 500, 10.0, 99.0),
        ];
        let now = dt("2024-06-15");

        assert!(approx(monthly_expenses(&records, now), 75.0));
        assert!(approx(yearly_expenses(&records, now), 95.0));
    }

    #[test]
    fn test_previous_month_rolls_over_year() {
        assert_eq!(previous_month(dt("2024-01-10")), (2023, 12));
        assert_eq!(previous_month(dt("2024-07-10")), (2024, 6));
    }

    #[test]
    fn test_comparison_january_uses_december() {
        let records = vec![
            fill("2023-12-20", 1000, 10.0, 50.0),
            fill("2024-01-05", 1300, 10.0, 75.0),
        ];
        let cmp = monthly_comparison(&records, dt("2024-01-20"));

        assert_eq!(cmp.current, 75.0);
        assert_eq!(cmp.previous, 50.0);
        assert!(approx(cmp.change, 50.0));
    }

    #[test]
    fn test_comparison_zero_previous_is_zero_change() {
        let records = vec![fill("2024-06-02", 1000, 10.0, 100.0)];
        let cmp = monthly_comparison(&records, dt("2024-06-20"));

        assert_eq!(cmp.current, 100.0);
        assert_eq!(cmp.previous, 0.0);
        assert_eq!(cmp.change, 0.0);
    }

    #[test]
    fn test_comparison_decrease_is_negative() {
        let records = vec![
            fill("2024-05-02", 1000, 10.0, 200.0),
            fill("2024-06-02", 1300, 10.0, 150.0),
        ];
        let cmp = monthly_comparison(&records, dt("2024-06-20"));
        assert!(approx(cmp.change, -25.0));
    }
}
