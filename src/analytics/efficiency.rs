//! Fuel economy derived from consecutive odometer readings.
//!
//! A segment is the stretch between two fill-ups in date order: its miles are
//! the odometer delta and its gallons are those bought at the later fill-up.
//! Segments whose later fill-up has no gallons are skipped.
//!
//! Odometer deltas are not clamped. Out-of-order or rolled-over readings
//! yield negative miles and flow through to every MPG figure as-is.

use chrono::NaiveDateTime;

use crate::analytics::types::TrendPoint;
use crate::analytics::utility::{odometer_delta, ratio, sorted_by_date};
use crate::records::FuelRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Date of the fill-up closing the segment.
    pub date: NaiveDateTime,
    pub miles: f64,
    pub gallons: f64,
}

impl Segment {
    pub fn mpg(&self) -> f64 {
        self.miles / self.gallons
    }
}

/// Valid segments of `records`, in ascending date order.
pub fn segments(records: &[FuelRecord]) -> Vec<Segment> {
    sorted_by_date(records)
        .windows(2)
        .filter(|pair| pair[1].gallons > 0.0)
        .map(|pair| Segment {
            date: pair[1].date,
            miles: odometer_delta(pair[0].mileage, pair[1].mileage),
            gallons: pair[1].gallons,
        })
        .collect()
}

/// Total miles over total gallons across all valid segments.
///
/// This weights each segment by its fuel, so it differs from the mean of the
/// per-segment MPG values. Returns 0 with fewer than two records.
pub fn average_mpg(records: &[FuelRecord]) -> f64 {
    let (miles, gallons) = segments(records)
        .iter()
        .fold((0.0, 0.0), |(m, g), s| (m + s.miles, g + s.gallons));
    ratio(miles, gallons)
}

/// Best and worst per-segment MPG; `None` until a valid segment is seen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MpgExtremes {
    pub best: Option<f64>,
    pub worst: Option<f64>,
}

pub fn mpg_extremes(records: &[FuelRecord]) -> MpgExtremes {
    segments(records)
        .iter()
        .map(Segment::mpg)
        .fold(MpgExtremes::default(), |acc, mpg| MpgExtremes {
            best: Some(acc.best.map_or(mpg, |b| b.max(mpg))),
            worst: Some(acc.worst.map_or(mpg, |w| w.min(mpg))),
        })
}

pub fn total_gallons(records: &[FuelRecord]) -> f64 {
    records.iter().map(|r| r.gallons).sum()
}

/// Total spend over total gallons.
pub fn average_fuel_price(records: &[FuelRecord]) -> f64 {
    let spend: f64 = records.iter().map(|r| r.total).sum();
    ratio(spend, total_gallons(records))
}

/// Per-segment MPG, one point per valid segment.
pub fn efficiency_trend(records: &[FuelRecord]) -> Vec<TrendPoint> {
    segments(records)
        .into_iter()
        .map(|s| TrendPoint {
            date: s.date.date(),
            value: s.mpg(),
        })
        .collect()
}
