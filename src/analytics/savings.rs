//! Rule-based savings recommendations.

use crate::analytics::efficiency::{average_mpg, total_gallons};
use crate::analytics::types::CostSavings;
use crate::analytics::utility::mean;
use crate::config::AnalyticsConfig;
use crate::records::{FuelRecord, VehicleProfile};

/// Applies each savings rule independently. Every rule that fires adds one
/// recommendation and its estimated saving to the total.
///
/// Needs a vehicle and at least two fill-ups.
pub fn cost_savings(
    records: &[FuelRecord],
    vehicle: Option<&VehicleProfile>,
    config: &AnalyticsConfig,
) -> CostSavings {
    let Some(vehicle) = vehicle else {
        return CostSavings::default();
    };
    if records.len() < 2 {
        return CostSavings::default();
    }

    let mut savings = CostSavings::default();
    let gallons = total_gallons(records);

    let prices: Vec<f64> = records.iter().map(|r| r.price_per_unit).collect();
    let avg_price = mean(&prices);
    let max_price = prices.iter().copied().fold(f64::MIN, f64::max);
    let min_price = prices.iter().copied().fold(f64::MAX, f64::min);
    let spread = max_price - min_price;

    if spread > config.price_spread_threshold {
        savings.recommendations.push(format!(
            "You could save up to ${spread:.2} per gallon by shopping around for better prices."
        ));
        savings.potential += spread * gallons;
    }

    let mpg = average_mpg(records);
    let rated = vehicle.rated_mpg;
    if mpg < rated * config.mpg_shortfall_ratio {
        savings.recommendations.push(format!(
            "Improving your driving habits could help you achieve the vehicle's rated MPG of {rated}."
        ));
        savings.potential += (rated - mpg) * avg_price * gallons;
    }

    savings
}
