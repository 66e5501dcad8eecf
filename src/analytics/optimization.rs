//! Where and when fuel is cheapest.

use chrono::{Datelike, Weekday};

use crate::analytics::types::{CostOptimization, StationPrice, WeekdayPrices};
use crate::analytics::utility::{odometer_delta, ratio, sorted_by_date};
use crate::records::FuelRecord;

const BEST_STATION_COUNT: usize = 3;
const UNKNOWN_STATION: &str = "Unknown";

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Cheapest stations by mean price, ties kept in order of first visit.
pub fn best_gas_stations(records: &[FuelRecord]) -> Vec<StationPrice> {
    let mut stations: Vec<(String, f64, u32)> = Vec::new();
    for r in sorted_by_date(records) {
        let name = r
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_STATION);
        match stations.iter_mut().find(|(n, _, _)| n == name) {
            Some((_, price_sum, visits)) => {
                *price_sum += r.price_per_unit;
                *visits += 1;
            }
            None => stations.push((name.to_string(), r.price_per_unit, 1)),
        }
    }

    let mut ranked: Vec<StationPrice> = stations
        .into_iter()
        .map(|(name, price_sum, visits)| StationPrice {
            name,
            average_price: price_sum / visits as f64,
            visits,
        })
        .collect();
    ranked.sort_by(|a, b| a.average_price.total_cmp(&b.average_price));
    ranked.truncate(BEST_STATION_COUNT);
    ranked
}

/// Mean price per weekday, plus the cheapest weekday among those with data.
fn weekday_prices(records: &[FuelRecord]) -> (WeekdayPrices, Option<Weekday>) {
    let mut sums = [0.0f64; 7];
    let mut counts = [0u32; 7];
    for r in records {
        let idx = r.date.weekday().num_days_from_monday() as usize;
        sums[idx] += r.price_per_unit;
        counts[idx] += 1;
    }

    let means: Vec<f64> = sums
        .iter()
        .zip(counts)
        .map(|(sum, n)| ratio(*sum, n as f64))
        .collect();

    // strict comparison keeps the earliest weekday on ties
    let cheapest = (0..7)
        .filter(|&i| counts[i] > 0)
        .reduce(|best, i| if means[i] < means[best] { i } else { best })
        .map(|i| WEEK[i]);

    let prices = WeekdayPrices {
        monday: means[0],
        tuesday: means[1],
        wednesday: means[2],
        thursday: means[3],
        friday: means[4],
        saturday: means[5],
        sunday: means[6],
    };
    (prices, cheapest)
}

/// Total spend over the odometer span from first to last fill-up.
pub fn cost_per_mile(records: &[FuelRecord]) -> f64 {
    let sorted = sorted_by_date(records);
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return 0.0;
    };
    let spend: f64 = records.iter().map(|r| r.total).sum();
    ratio(spend, odometer_delta(first.mileage, last.mileage))
}

pub fn cost_optimization(records: &[FuelRecord]) -> CostOptimization {
    if records.is_empty() {
        return CostOptimization::default();
    }

    let (price_trends, cheapest) = weekday_prices(records);

    CostOptimization {
        best_gas_stations: best_gas_stations(records),
        price_trends,
        cost_per_mile: cost_per_mile(records),
        optimal_refueling_time: cheapest.map(|d| weekday_name(d).to_string()),
    }
}
