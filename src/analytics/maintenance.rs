//! Service scheduling and maintenance spend.

use chrono::{Datelike, Months, NaiveDateTime, TimeDelta};
use tracing::warn;

use crate::analytics::periods::in_month;
use crate::analytics::types::{
    CategoryAmount, MaintenanceCosts, MaintenancePrediction, MaintenanceTrend,
};
use crate::analytics::utility::odometer_delta;
use crate::config::AnalyticsConfig;
use crate::records::{ServiceRecord, VehicleProfile};

const CATEGORY_DELIMITER: &str = " - ";
const DEFAULT_CATEGORY: &str = "Other";

/// Human-readable distance to the vehicle's next scheduled service.
pub fn next_service(vehicle: Option<&VehicleProfile>) -> String {
    let Some(vehicle) = vehicle else {
        return "No vehicle data".to_string();
    };

    let miles_until = vehicle.next_service_mileage.saturating_sub(vehicle.current_mileage);
    if miles_until <= 0 {
        "Service Due Now".to_string()
    } else {
        format!("{} miles until next service", group_thousands(miles_until))
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Projects the next occurrence of every tracked service type from its most
/// recent record. Types never serviced before produce no entry, and neither
/// does a projection that cannot be dated (no daily mileage configured, or a
/// date outside the calendar range).
pub fn maintenance_predictions(
    vehicle: Option<&VehicleProfile>,
    services: &[ServiceRecord],
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> Vec<MaintenancePrediction> {
    let Some(vehicle) = vehicle else {
        return Vec::new();
    };
    if config.average_daily_miles <= 0.0 {
        warn!(
            average_daily_miles = config.average_daily_miles,
            "Daily mileage must be positive, skipping maintenance predictions"
        );
        return Vec::new();
    }

    config
        .tracked_services
        .iter()
        .filter_map(|tracked| {
            // earliest-listed record wins among equal dates
            let last = services
                .iter()
                .filter(|r| r.service_type == tracked.service_type)
                .reduce(|best, r| if r.date > best.date { r } else { best })?;

            let miles_since = odometer_delta(last.mileage, vehicle.current_mileage);
            let remaining = tracked.interval_miles - miles_since;
            let days = remaining / config.average_daily_miles;
            let offset_secs = (days * 86_400.0).round() as i64;
            let Some(predicted) = TimeDelta::try_seconds(offset_secs)
                .and_then(|delta| now.checked_add_signed(delta))
            else {
                warn!(
                    service_type = %tracked.service_type,
                    days,
                    "Projected service date out of range, skipping"
                );
                return None;
            };

            Some(MaintenancePrediction {
                service_type: tracked.service_type.clone(),
                predicted_date: predicted.date(),
                predicted_mileage: vehicle.current_mileage as f64 + remaining,
                confidence: config.prediction_confidence,
            })
        })
        .collect()
}

/// Derives a maintenance category from free text: the part of the
/// description before the first `" - "`, or `"Other"` when that is blank.
///
/// Descriptions are typed by hand, so "Brakes" and "brakes" are distinct
/// categories.
pub fn service_category(description: Option<&str>) -> String {
    description
        .and_then(|d| d.split(CATEGORY_DELIMITER).next())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

pub fn maintenance_costs(services: &[ServiceRecord], now: NaiveDateTime) -> MaintenanceCosts {
    let total = services.iter().map(|r| r.cost).sum();
    let yearly = services
        .iter()
        .filter(|r| r.date.year() == now.year())
        .map(|r| r.cost)
        .sum();
    let monthly = services
        .iter()
        .filter(|r| in_month(r.date, now.year(), now.month()))
        .map(|r| r.cost)
        .sum();

    let mut by_category: Vec<CategoryAmount> = Vec::new();
    for r in services {
        let category = service_category(r.description.as_deref());
        match by_category.iter_mut().find(|c| c.category == category) {
            Some(entry) => entry.amount += r.cost,
            None => by_category.push(CategoryAmount {
                category,
                amount: r.cost,
            }),
        }
    }

    MaintenanceCosts {
        total,
        monthly,
        yearly,
        by_category,
    }
}

/// Service spend over the trailing 3, 6 and 12 months up to `now`.
pub fn maintenance_trend(services: &[ServiceRecord], now: NaiveDateTime) -> MaintenanceTrend {
    let spend_since = |months: u32| -> f64 {
        let Some(start) = now.checked_sub_months(Months::new(months)) else {
            return 0.0;
        };
        services
            .iter()
            .filter(|r| r.date >= start && r.date <= now)
            .map(|r| r.cost)
            .sum()
    };

    MaintenanceTrend {
        last_3_months: spend_since(3),
        last_6_months: spend_since(6),
        last_year: spend_since(12),
    }
}
