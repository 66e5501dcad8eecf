//! Emissions estimates and the eco-driving score.

use crate::analytics::efficiency::{average_mpg, total_gallons};
use crate::analytics::types::{
    EnvironmentalImpact, EnvironmentalScore, SavingsPotential, WeatherImpact,
};
use crate::analytics::utility::{ratio, sorted_by_date};
use crate::records::{FuelRecord, VehicleProfile};

/// Kilograms of CO2 released by burning one gallon of gasoline.
pub const CO2_KG_PER_GALLON: f64 = 8.887;
/// Trees needed to offset one metric ton of CO2.
pub const TREES_PER_TON_CO2: f64 = 0.5;
/// Dollars per metric ton of CO2 offset.
pub const CARBON_OFFSET_PRICE: f64 = 20.0;

const RAIN_FACTOR: f64 = 0.90;
const COLD_FACTOR: f64 = 0.85;

pub fn environmental_impact(records: &[FuelRecord]) -> EnvironmentalImpact {
    let co2_emissions = total_gallons(records) * CO2_KG_PER_GALLON;
    let tons = co2_emissions / 1000.0;

    EnvironmentalImpact {
        co2_emissions,
        trees_needed: tons * TREES_PER_TON_CO2,
        carbon_offset_cost: tons * CARBON_OFFSET_PRICE,
    }
}

/// Scores actual MPG against the vehicle's rating and estimates what closing
/// the gap would save. Zero without records or a vehicle.
pub fn environmental_score(
    records: &[FuelRecord],
    vehicle: Option<&VehicleProfile>,
) -> EnvironmentalScore {
    let Some(vehicle) = vehicle else {
        return EnvironmentalScore::default();
    };
    let Some(last) = sorted_by_date(records).last().copied() else {
        return EnvironmentalScore::default();
    };

    let actual = average_mpg(records);
    let rated = vehicle.rated_mpg;
    let eco_driving_score = (ratio(actual, rated) * 100.0).min(100.0);

    let gallons_per_fill = total_gallons(records) / records.len() as f64;
    let monthly = (rated - actual) * gallons_per_fill * last.price_per_unit;

    EnvironmentalScore {
        eco_driving_score,
        weather_impact: WeatherImpact {
            sunny: actual,
            rainy: actual * RAIN_FACTOR,
            cold: actual * COLD_FACTOR,
        },
        savings_potential: SavingsPotential {
            monthly,
            yearly: monthly * 12.0,
        },
    }
}
