//! Report types produced by the analytics pipeline.

use chrono::NaiveDate;
use serde::Serialize;

/// One point of a time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleStats {
    pub make: String,
    pub model: String,
    pub current_mileage: i64,
}

/// Current vs. previous calendar month fuel spend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyComparison {
    pub current: f64,
    pub previous: f64,
    /// Percent change; 0 when the previous month had no spend.
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceHistoryEntry {
    pub date: NaiveDate,
    pub service_type: String,
    pub mileage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdownEntry {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenancePrediction {
    pub service_type: String,
    pub predicted_date: NaiveDate,
    pub predicted_mileage: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnvironmentalImpact {
    /// Kilograms of CO2.
    pub co2_emissions: f64,
    pub trees_needed: f64,
    pub carbon_offset_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaintenanceCosts {
    pub total: f64,
    pub monthly: f64,
    pub yearly: f64,
    pub by_category: Vec<CategoryAmount>,
}

/// Service spend over trailing windows ending at the reference date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaintenanceTrend {
    pub last_3_months: f64,
    pub last_6_months: f64,
    pub last_year: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostSavings {
    pub potential: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekdaySplit {
    pub weekday: f64,
    pub weekend: f64,
}

/// Refuel counts by time of day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefuelingPatterns {
    pub morning: u32,
    pub afternoon: u32,
    pub evening: u32,
    pub night: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrivingBehavior {
    pub average_daily_mileage: f64,
    pub average_days_between_refuels: f64,
    pub weekday_vs_weekend: WeekdaySplit,
    pub refueling_patterns: RefuelingPatterns,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationPrice {
    pub name: String,
    pub average_price: f64,
    pub visits: u32,
}

/// Mean price per unit by day of week; 0 for days without purchases.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekdayPrices {
    pub monday: f64,
    pub tuesday: f64,
    pub wednesday: f64,
    pub thursday: f64,
    pub friday: f64,
    pub saturday: f64,
    pub sunday: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostOptimization {
    pub best_gas_stations: Vec<StationPrice>,
    pub price_trends: WeekdayPrices,
    pub cost_per_mile: f64,
    /// Lowercase weekday name with the cheapest mean price.
    pub optimal_refueling_time: Option<String>,
}

/// MPG adjusted for driving conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherImpact {
    pub sunny: f64,
    pub rainy: f64,
    pub cold: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SavingsPotential {
    pub monthly: f64,
    pub yearly: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnvironmentalScore {
    pub eco_driving_score: f64,
    pub weather_impact: WeatherImpact,
    pub savings_potential: SavingsPotential,
}

/// Snapshot returned by a single analytics computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub monthly_expenses: f64,
    pub yearly_expenses: f64,
    pub total_gallons: f64,
    pub average_fuel_price: f64,
    pub avg_mpg: f64,
    pub best_mpg: f64,
    pub worst_mpg: f64,
    pub next_service: String,
    pub service_mileage: i64,
    pub vehicle_stats: VehicleStats,
    pub fuel_trends: Vec<TrendPoint>,
    pub cost_trends: Vec<TrendPoint>,
    pub fuel_efficiency_trend: Vec<TrendPoint>,
    pub monthly_comparison: MonthlyComparison,
    pub service_history: Vec<ServiceHistoryEntry>,
    pub cost_breakdown: Vec<CostBreakdownEntry>,
    pub maintenance_predictions: Vec<MaintenancePrediction>,
    pub environmental_impact: EnvironmentalImpact,
    pub maintenance_costs: MaintenanceCosts,
    pub maintenance_trend: MaintenanceTrend,
    pub cost_savings: CostSavings,
    pub driving_behavior: DrivingBehavior,
    pub cost_optimization: CostOptimization,
    pub environmental_score: EnvironmentalScore,
}
