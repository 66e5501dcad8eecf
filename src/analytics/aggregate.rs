use chrono::NaiveDateTime;
use tracing::debug;

use crate::analytics::types::{AnalyticsReport, VehicleStats};
use crate::analytics::{
    behavior, efficiency, environment, maintenance, optimization, periods, savings, trends,
};
use crate::config::AnalyticsConfig;
use crate::records::{FuelRecord, ServiceRecord, VehicleProfile};

/// Builds a complete [`AnalyticsReport`] from the three record collections.
///
/// Each section is computed independently; a section lacking data comes back
/// zeroed without affecting the rest. `now` anchors every calendar window,
/// so identical inputs always give an identical report.
#[tracing::instrument(
    skip_all,
    fields(
        fuel = fuel.len(),
        services = services.len(),
        has_vehicle = vehicle.is_some(),
        now = %now
    )
)]
pub fn compute_analytics(
    fuel: &[FuelRecord],
    services: &[ServiceRecord],
    vehicle: Option<&VehicleProfile>,
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> AnalyticsReport {
    let extremes = efficiency::mpg_extremes(fuel);

    let report = AnalyticsReport {
        monthly_expenses: periods::monthly_expenses(fuel, now),
        yearly_expenses: periods::yearly_expenses(fuel, now),
        total_gallons: efficiency::total_gallons(fuel),
        average_fuel_price: efficiency::average_fuel_price(fuel),
        avg_mpg: efficiency::average_mpg(fuel),
        best_mpg: extremes.best.unwrap_or(0.0),
        worst_mpg: extremes.worst.unwrap_or(0.0),
        next_service: maintenance::next_service(vehicle),
        service_mileage: vehicle.map_or(0, |v| v.next_service_mileage),
        vehicle_stats: vehicle
            .map(|v| VehicleStats {
                make: v.make.clone(),
                model: v.model.clone(),
                current_mileage: v.current_mileage,
            })
            .unwrap_or_default(),
        fuel_trends: trends::fuel_trend(fuel),
        cost_trends: trends::cost_trend(fuel),
        fuel_efficiency_trend: efficiency::efficiency_trend(fuel),
        monthly_comparison: periods::monthly_comparison(fuel, now),
        service_history: trends::service_history(services),
        cost_breakdown: trends::cost_breakdown(fuel),
        maintenance_predictions: maintenance::maintenance_predictions(
            vehicle, services, now, config,
        ),
        environmental_impact: environment::environmental_impact(fuel),
        maintenance_costs: maintenance::maintenance_costs(services, now),
        maintenance_trend: maintenance::maintenance_trend(services, now),
        cost_savings: savings::cost_savings(fuel, vehicle, config),
        driving_behavior: behavior::driving_behavior(fuel),
        cost_optimization: optimization::cost_optimization(fuel),
        environmental_score: environment::environmental_score(fuel, vehicle),
    };

    debug!(
        monthly = report.monthly_expenses,
        yearly = report.yearly_expenses,
        avg_mpg = report.avg_mpg,
        predictions = report.maintenance_predictions.len(),
        recommendations = report.cost_savings.recommendations.len(),
        "Analytics computed"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{approx, dt, fill, service, vehicle};

    #[test]
    fn test_empty_input_is_all_zero() {
        let report =
            compute_analytics(&[], &[], None, dt("2024-06-15"), &AnalyticsConfig::default());

        let expected = AnalyticsReport {
            next_service: "No vehicle data".to_string(),
            ..AnalyticsReport::default()
        };
        assert_eq!(report, expected);
    }

    #[test]
    fn test_single_record_zero_mpg() {
        let fuel = vec![fill("2024-06-02", 1000, 10.0, 35.0)];
        let report =
            compute_analytics(&fuel, &[], None, dt("2024-06-15"), &AnalyticsConfig::default());

        assert_eq!(report.avg_mpg, 0.0);
        assert_eq!(report.best_mpg, 0.0);
        assert_eq!(report.worst_mpg, 0.0);
        assert_eq!(report.monthly_expenses, 35.0);
        assert_eq!(report.fuel_trends.len(), 1);
        assert!(report.fuel_efficiency_trend.is_empty());
    }

    #[test]
    fn test_sections_are_independent() {
        // no vehicle: vehicle-driven sections stay empty, the rest still compute
        let fuel = vec![
            fill("2024-06-01", 1000, 10.0, 35.0),
            fill("2024-06-08", 1300, 10.0, 36.0),
        ];
        let services = vec![service("2024-05-01", 900, "Oil Change", 45.0, "Engine - oil")];
        let report = compute_analytics(
            &fuel,
            &services,
            None,
            dt("2024-06-15"),
            &AnalyticsConfig::default(),
        );

        assert!(report.maintenance_predictions.is_empty());
        assert_eq!(report.cost_savings.potential, 0.0);
        assert_eq!(report.environmental_score.eco_driving_score, 0.0);
        assert!(approx(report.avg_mpg, 30.0));
        assert_eq!(report.maintenance_costs.total, 45.0);
        assert_eq!(report.cost_optimization.best_gas_stations.len(), 1);
    }

    #[test]
    fn test_vehicle_fields() {
        let v = vehicle(15_500, 19_000, 30.0);
        let services = vec![service("2024-04-10", 14_000, "Oil Change", 50.0, "")];
        let report = compute_analytics(
            &[],
            &services,
            Some(&v),
            dt("2024-06-01"),
            &AnalyticsConfig::default(),
        );

        assert_eq!(report.service_mileage, 19_000);
        assert_eq!(report.vehicle_stats.make, "Toyota");
        assert_eq!(report.vehicle_stats.current_mileage, 15_500);
        assert_eq!(report.next_service, "3,500 miles until next service");
        assert_eq!(report.maintenance_predictions.len(), 1);
    }

    #[test]
    fn test_extreme_odometer_readings() {
        let fuel: Vec<FuelRecord> = serde_json::from_str(
            r#"[
                {"date": "2024-06-01", "mileage": -1e19, "gallons": 10, "total": 35},
                {"date": "2024-06-08", "mileage": 1e19, "gallons": 10, "total": 36},
                {"date": "2024-06-09", "mileage": -9e18, "gallons": 10, "total": 34},
                {"date": "2024-06-10", "mileage": 9e18, "gallons": 10, "total": 33}
            ]"#,
        )
        .unwrap();
        let v = vehicle(-9_000_000_000_000_000_000, 9_000_000_000_000_000_000, 30.0);
        let services = vec![service(
            "2024-05-01",
            9_000_000_000_000_000_000,
            "Oil Change",
            45.0,
            "",
        )];

        let report = compute_analytics(
            &fuel,
            &services,
            Some(&v),
            dt("2024-06-15"),
            &AnalyticsConfig::default(),
        );

        // out-of-range readings load as 0, in-range extremes are kept
        assert!(approx(report.best_mpg, 1.8e18));
        assert!(approx(report.worst_mpg, -9e17));
        assert_eq!(report.next_service, "9,223,372,036,854,775,807 miles until next service");
        assert!(report.avg_mpg.is_finite());
        assert_eq!(report.monthly_expenses, 138.0);
    }

    #[test]
    fn test_same_inputs_same_report() {
        let fuel = vec![
            fill("2024-06-08 18:00", 1300, 10.0, 36.0),
            fill("2024-06-01 07:30", 1000, 10.0, 35.0),
            fill("2024-05-20 13:00", 800, 8.0, 30.0),
        ];
        let services = vec![service("2024-05-01", 900, "Oil Change", 45.0, "Engine - oil")];
        let v = vehicle(1300, 5000, 32.0);
        let now = dt("2024-06-15");
        let config = AnalyticsConfig::default();

        let a = compute_analytics(&fuel, &services, Some(&v), now, &config);
        let b = compute_analytics(&fuel, &services, Some(&v), now, &config);

        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
