//! Record builders shared by the analytics unit tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::records::{FuelRecord, ServiceRecord, VehicleProfile};

/// Parses `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`.
pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap_or_else(|_| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    })
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn fill(when: &str, mileage: i64, gallons: f64, total: f64) -> FuelRecord {
    FuelRecord {
        date: dt(when),
        location: Some("Shell".to_string()),
        mileage,
        gallons,
        price_per_unit: if gallons > 0.0 { total / gallons } else { 0.0 },
        total,
        payment_type: Some("Card".to_string()),
    }
}

pub fn priced(when: &str, mileage: i64, gallons: f64, price: f64, station: &str) -> FuelRecord {
    FuelRecord {
        date: dt(when),
        location: Some(station.to_string()),
        mileage,
        gallons,
        price_per_unit: price,
        total: gallons * price,
        payment_type: None,
    }
}

pub fn service(
    when: &str,
    mileage: i64,
    service_type: &str,
    cost: f64,
    desc: &str,
) -> ServiceRecord {
    ServiceRecord {
        date: dt(when),
        mileage,
        service_type: service_type.to_string(),
        cost,
        description: Some(desc.to_string()),
    }
}

pub fn vehicle(current_mileage: i64, next_service_mileage: i64, rated_mpg: f64) -> VehicleProfile {
    VehicleProfile {
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        current_mileage,
        next_service_mileage,
        rated_mpg,
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
