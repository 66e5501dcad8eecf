//! Chart series and month grouping.

use crate::analytics::types::{CostBreakdownEntry, ServiceHistoryEntry, TrendPoint};
use crate::analytics::utility::{pct, sorted_by_date};
use crate::records::{FuelRecord, ServiceRecord};

/// Gallons per fill-up, one point per record.
pub fn fuel_trend(records: &[FuelRecord]) -> Vec<TrendPoint> {
    series(records, |r| r.gallons)
}

/// Spend per fill-up, one point per record.
pub fn cost_trend(records: &[FuelRecord]) -> Vec<TrendPoint> {
    series(records, |r| r.total)
}

fn series(records: &[FuelRecord], value: impl Fn(&FuelRecord) -> f64) -> Vec<TrendPoint> {
    sorted_by_date(records)
        .into_iter()
        .map(|r| TrendPoint {
            date: r.date.date(),
            value: value(r),
        })
        .collect()
}

pub fn service_history(records: &[ServiceRecord]) -> Vec<ServiceHistoryEntry> {
    sorted_by_date(records)
        .into_iter()
        .map(|r| ServiceHistoryEntry {
            date: r.date.date(),
            service_type: r.service_type.clone(),
            mileage: r.mileage,
        })
        .collect()
}

/// Groups spend by full month name ("January", ...) in order of first
/// appearance. Months from different years share a bucket.
pub fn cost_breakdown(records: &[FuelRecord]) -> Vec<CostBreakdownEntry> {
    let grand_total: f64 = records.iter().map(|r| r.total).sum();

    let mut groups: Vec<(String, f64)> = Vec::new();
    for r in sorted_by_date(records) {
        let month = r.date.format("%B").to_string();
        match groups.iter_mut().find(|(name, _)| *name == month) {
            Some((_, amount)) => *amount += r.total,
            None => groups.push((month, r.total)),
        }
    }

    groups
        .into_iter()
        .map(|(category, amount)| CostBreakdownEntry {
            percentage: pct(amount, grand_total),
            category,
            amount,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{approx, date, fill, service};

    #[test]
    fn test_trends_one_point_per_record() {
        let records = vec![
            fill("2024-02-10", 1300, 9.0, 30.0),
            fill("2024-02-01", 1000, 11.0, 40.0),
        ];
        let fuel = fuel_trend(&records);
        let cost = cost_trend(&records);

        assert_eq!(fuel.len(), 2);
        assert_eq!(fuel[0].date, date("2024-02-01"));
        assert_eq!(fuel[0].value, 11.0);
        assert_eq!(cost[1].value, 30.0);
    }

    #[test]
    fn test_breakdown_two_months_sums_to_100() {
        let records = vec![
            fill("2024-03-03", 1000, 10.0, 60.0),
            fill("2024-03-20", 1200, 10.0, 40.0),
            fill("2024-04-02", 1400, 10.0, 150.0),
        ];
        let breakdown = cost_breakdown(&records);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "March");
        assert_eq!(breakdown[0].amount, 100.0);
        assert!(approx(breakdown[0].percentage, 40.0));
        assert_eq!(breakdown[1].category, "April");
        assert!(approx(breakdown[1].percentage, 60.0));
        let sum: f64 = breakdown.iter().map(|e| e.percentage).sum();
        assert!(approx(sum, 100.0));
    }

    #[test]
    fn test_breakdown_zero_spend() {
        let records = vec![fill("2024-03-03", 1000, 0.0, 0.0)];
        let breakdown = cost_breakdown(&records);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].percentage, 0.0);
    }

    #[test]
    fn test_breakdown_merges_same_month_across_years() {
        let records = vec![
            fill("2023-05-03", 1000, 10.0, 10.0),
            fill("2024-05-03", 9000, 10.0, 30.0),
        ];
        let breakdown = cost_breakdown(&records);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].amount, 40.0);
    }

    #[test]
    fn test_service_history_sorted() {
        let records = vec![
            service("2024-05-01", 6000, "Tire Rotation", 40.0, ""),
            service("2024-01-01", 1000, "Oil Change", 50.0, ""),
        ];
        let history = service_history(&records);
        assert_eq!(history[0].service_type, "Oil Change");
        assert_eq!(history[1].mileage, 6000);
    }
}
