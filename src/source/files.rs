use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::RecordSource;
use crate::records::{
    FuelRecord, ServiceRecord, VehicleProfile, load_fuel_csv, load_service_csv, load_vehicle_json,
};

/// Reads records from local exports: two CSV files and a vehicle JSON.
///
/// A file that does not exist counts as an empty collection, matching a user
/// who simply has not logged anything of that kind yet.
pub struct FileSource {
    pub fuel_path: PathBuf,
    pub service_path: PathBuf,
    pub vehicle_path: Option<PathBuf>,
}

impl FileSource {
    pub fn new(
        fuel_path: impl Into<PathBuf>,
        service_path: impl Into<PathBuf>,
        vehicle_path: Option<PathBuf>,
    ) -> Self {
        Self {
            fuel_path: fuel_path.into(),
            service_path: service_path.into(),
            vehicle_path,
        }
    }
}

fn present(path: &Path) -> bool {
    if path.exists() {
        return true;
    }
    warn!(path = %path.display(), "Record file not found, treating as empty");
    false
}

#[async_trait]
impl RecordSource for FileSource {
    async fn fuel_records(&self) -> Result<Vec<FuelRecord>> {
        if !present(&self.fuel_path) {
            return Ok(Vec::new());
        }
        load_fuel_csv(&self.fuel_path)
    }

    async fn service_records(&self) -> Result<Vec<ServiceRecord>> {
        if !present(&self.service_path) {
            return Ok(Vec::new());
        }
        load_service_csv(&self.service_path)
    }

    async fn vehicle(&self) -> Result<Option<VehicleProfile>> {
        match &self.vehicle_path {
            Some(path) if present(path) => load_vehicle_json(path),
            _ => Ok(None),
        }
    }
}
