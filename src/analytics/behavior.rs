//! Driving-pattern heuristics from fill-up timing and odometer readings.

use chrono::{Datelike, Timelike, Weekday};

use crate::analytics::types::{DrivingBehavior, RefuelingPatterns, WeekdaySplit};
use crate::analytics::utility::{days_between, mean, odometer_delta, ratio, sorted_by_date};
use crate::records::FuelRecord;

pub fn driving_behavior(records: &[FuelRecord]) -> DrivingBehavior {
    let sorted = sorted_by_date(records);
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return DrivingBehavior::default();
    };

    let elapsed_days = days_between(first.date, last.date);
    let average_daily_mileage = ratio(odometer_delta(first.mileage, last.mileage), elapsed_days);

    let gaps: Vec<f64> = sorted
        .windows(2)
        .map(|pair| days_between(pair[0].date, pair[1].date))
        .filter(|days| *days > 0.0)
        .collect();

    let mut split = WeekdaySplit::default();
    let mut patterns = RefuelingPatterns::default();
    let mut previous_mileage = first.mileage;

    for r in &sorted {
        // first record contributes no distance
        let miles = odometer_delta(previous_mileage, r.mileage);
        previous_mileage = r.mileage;

        match r.date.weekday() {
            Weekday::Sat | Weekday::Sun => split.weekend += miles,
            _ => split.weekday += miles,
        }

        match r.date.hour() {
            5..=11 => patterns.morning += 1,
            12..=16 => patterns.afternoon += 1,
            17..=21 => patterns.evening += 1,
            _ => patterns.night += 1,
        }
    }

    DrivingBehavior {
        average_daily_mileage,
        average_days_between_refuels: mean(&gaps),
        weekday_vs_weekend: split,
        refueling_patterns: patterns,
    }
}
