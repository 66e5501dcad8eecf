//! Input records supplied by a record source.
//!
//! The store hands back loosely typed rows: numbers may arrive as strings,
//! blanks or `null`. Numeric fields therefore deserialize leniently and fall
//! back to zero instead of rejecting the row.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// A single fuel purchase.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FuelRecord {
    #[serde(deserialize_with = "local_datetime")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub location: Option<String>,
    /// Odometer reading at fill-up.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub mileage: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gallons: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_per_unit: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: f64,
    #[serde(default)]
    pub payment_type: Option<String>,
}

/// A maintenance visit.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceRecord {
    #[serde(deserialize_with = "local_datetime")]
    pub date: NaiveDateTime,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub mileage: i64,
    #[serde(default)]
    pub service_type: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VehicleProfile {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub current_mileage: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub next_service_mileage: i64,
    #[serde(default, alias = "mpg", deserialize_with = "lenient_f64")]
    pub rated_mpg: f64,
}

/// Parses the date formats the store and CSV exports produce.
///
/// RFC 3339 timestamps keep the wall-clock time at their written offset, so
/// month and year boundaries follow the calendar the record was entered in.
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn local_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_local_datetime(&raw)
        .ok_or_else(|| de::Error::custom(format!("unrecognized date '{raw}'")))
}

/// Accepts any scalar and coerces it to `f64`, yielding 0 for blanks,
/// `null` and non-numeric text.
struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, numeric string or null")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(if v.is_finite() { v } else { 0.0 })
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(v
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0))
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(LenientNumber)
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientNumber)
}

/// Like [`lenient_f64`], truncated toward zero. Readings outside the `i64`
/// range count as malformed and become 0.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63

    let n = deserializer.deserialize_any(LenientNumber)?.trunc();
    Ok(if (-LIMIT..LIMIT).contains(&n) { n as i64 } else { 0 })
}

/// Reads fuel purchases from a CSV export with a header row.
pub fn load_fuel_csv(path: impl AsRef<Path>) -> Result<Vec<FuelRecord>> {
    load_csv(path.as_ref())
}

/// Reads service records from a CSV export with a header row.
pub fn load_service_csv(path: impl AsRef<Path>) -> Result<Vec<ServiceRecord>> {
    load_csv(path.as_ref())
}

fn load_csv<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let record: T =
            result.with_context(|| format!("{}: bad row {}", path.display(), line + 1))?;
        rows.push(record);
    }

    debug!(path = %path.display(), rows = rows.len(), "CSV records loaded");
    Ok(rows)
}

/// Reads a vehicle profile from a JSON object. An empty file or `null`
/// means the user has no vehicle on record.
pub fn load_vehicle_json(path: impl AsRef<Path>) -> Result<Option<VehicleProfile>> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_date_only_is_midnight() {
        let dt = parse_local_datetime("2024-03-05").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_rfc3339_keeps_wall_clock() {
        let dt = parse_local_datetime("2024-03-31T23:30:00-05:00").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(dt.hour(), 23);
    }

    #[test]
    fn test_parse_garbage_date() {
        assert!(parse_local_datetime("last tuesday").is_none());
    }

    #[test]
    fn test_fuel_record_coerces_bad_numbers() {
        let json = r#"{
            "date": "2024-01-10T08:15:00",
            "location": "Shell",
            "mileage": "12000.7",
            "gallons": null,
            "price_per_unit": "n/a",
            "total": 41.5
        }"#;
        let rec: FuelRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.mileage, 12000);
        assert_eq!(rec.gallons, 0.0);
        assert_eq!(rec.price_per_unit, 0.0);
        assert_eq!(rec.total, 41.5);
        assert!(rec.payment_type.is_none());
    }

    #[test]
    fn test_out_of_range_mileage_becomes_zero() {
        let rows: Vec<FuelRecord> = serde_json::from_str(
            r#"[
                {"date": "2024-01-10", "mileage": -1e19, "gallons": 10},
                {"date": "2024-01-17", "mileage": 1e19, "gallons": 10},
                {"date": "2024-01-24", "mileage": "9.3e18", "gallons": 10},
                {"date": "2024-01-31", "mileage": -9e18, "gallons": 10}
            ]"#,
        )
        .unwrap();
        let mileages: Vec<i64> = rows.iter().map(|r| r.mileage).collect();
        assert_eq!(mileages, vec![0, 0, 0, -9_000_000_000_000_000_000]);
    }

    #[test]
    fn test_service_record_missing_fields_default() {
        let rec: ServiceRecord = serde_json::from_str(r#"{"date": "2024-02-01"}"#).unwrap();
        assert_eq!(rec.mileage, 0);
        assert_eq!(rec.cost, 0.0);
        assert!(rec.service_type.is_empty());
        assert!(rec.description.is_none());
    }

    #[test]
    fn test_vehicle_accepts_mpg_alias() {
        let v: VehicleProfile =
            serde_json::from_str(r#"{"make": "Honda", "model": "Fit", "mpg": 36}"#).unwrap();
        assert_eq!(v.rated_mpg, 36.0);
        assert_eq!(v.current_mileage, 0);
    }

    #[test]
    fn test_load_fuel_csv_with_blanks() {
        let path = std::env::temp_dir().join("fuel_analytics_records_blank.csv");
        std::fs::write(
            &path,
            "date,location,mileage,gallons,price_per_unit,total,payment_type\n\
             2024-01-01,Shell,1000,10,3.50,35.00,Card\n\
             2024-01-08,,1300,,3.40,,Cash\n",
        )
        .unwrap();

        let rows = load_fuel_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].gallons, 0.0);
        assert_eq!(rows[1].total, 0.0);
        assert_eq!(rows[1].mileage, 1300);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_fuel_csv_rejects_bad_date() {
        let path = std::env::temp_dir().join("fuel_analytics_records_bad_date.csv");
        std::fs::write(&path, "date,mileage\nyesterday,100\n").unwrap();

        assert!(load_fuel_csv(&path).is_err());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_vehicle_json_empty_file() {
        let path = std::env::temp_dir().join("fuel_analytics_records_vehicle_empty.json");
        std::fs::write(&path, "  \n").unwrap();

        assert!(load_vehicle_json(&path).unwrap().is_none());

        std::fs::remove_file(&path).unwrap();
    }
}
