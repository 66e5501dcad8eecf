//! Record sources and the refresh entry point.
//!
//! A [`RecordSource`] supplies the three collections the analytics need. It
//! owns user scoping and persistence; the analytics only see plain records.

mod files;
mod rest;

pub use files::FileSource;
pub use rest::RestSource;

use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::info;

use crate::analytics::{AnalyticsReport, compute_analytics};
use crate::config::AnalyticsConfig;
use crate::records::{FuelRecord, ServiceRecord, VehicleProfile};

#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    async fn fuel_records(&self) -> Result<Vec<FuelRecord>>;
    async fn service_records(&self) -> Result<Vec<ServiceRecord>>;
    /// `None` when the user has no vehicle on record.
    async fn vehicle(&self) -> Result<Option<VehicleProfile>>;
}

/// Fetches all three collections concurrently and computes a fresh report.
///
/// Nothing is cached between calls. A fetch failure is returned as-is so the
/// caller can keep showing its previous report.
#[tracing::instrument(skip_all, fields(now = %now))]
pub async fn refresh<S: RecordSource + ?Sized>(
    source: &S,
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> Result<AnalyticsReport> {
    let (fuel, services, vehicle) = tokio::try_join!(
        source.fuel_records(),
        source.service_records(),
        source.vehicle()
    )?;

    info!(
        fuel = fuel.len(),
        services = services.len(),
        has_vehicle = vehicle.is_some(),
        "Records fetched"
    );

    Ok(compute_analytics(
        &fuel,
        &services,
        vehicle.as_ref(),
        now,
        config,
    ))
}
