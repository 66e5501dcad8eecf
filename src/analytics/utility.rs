use chrono::NaiveDateTime;

use crate::records::{FuelRecord, ServiceRecord};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Divides `num` by `den`, yielding 0.0 instead of NaN or infinity when the
/// denominator is zero.
pub fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

/// `part / whole` as a percentage, 0.0 when `whole` is zero.
pub fn pct(part: f64, whole: f64) -> f64 {
    ratio(part, whole) * 100.0
}

/// Miles between two odometer readings; negative when `to` is the lower one.
pub fn odometer_delta(from: i64, to: i64) -> f64 {
    to as f64 - from as f64
}

/// Elapsed fractional days from `from` to `to`; negative if `to` is earlier.
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / SECONDS_PER_DAY
}

/// Records carrying the timestamp they are ordered by.
pub trait Dated {
    fn timestamp(&self) -> NaiveDateTime;
}

impl Dated for FuelRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.date
    }
}

impl Dated for ServiceRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.date
    }
}

/// Borrows `records` in ascending date order. The sort is stable, so records
/// sharing a timestamp keep their input order.
pub fn sorted_by_date<T: Dated>(records: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by_key(|r| r.timestamp());
    sorted
}
