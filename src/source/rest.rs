use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use super::RecordSource;
use crate::config::RestConfig;
use crate::fetch::{ApiKey, BasicClient, HttpClient, fetch_json};
use crate::records::{FuelRecord, ServiceRecord, VehicleProfile};

const FUEL_TABLE: &str = "fuel_expenses";
const SERVICE_TABLE: &str = "service_records";
const VEHICLE_TABLE: &str = "vehicles";

/// Reads records from a PostgREST endpoint such as Supabase's `/rest/v1`.
pub struct RestSource<C> {
    client: C,
    base_url: String,
    user_id: Option<String>,
}

impl RestSource<ApiKey<BasicClient>> {
    pub fn from_config(config: &RestConfig) -> Result<Self> {
        let client = ApiKey::supabase(
            BasicClient::new()?,
            &config.anon_key,
            config.access_token.as_deref(),
        )?;
        Ok(Self::new(client, &config.base_url, config.user_id.clone()))
    }
}

impl<C: HttpClient> RestSource<C> {
    pub fn new(client: C, base_url: &str, user_id: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
        }
    }

    /// Builds a table query scoped to the configured user.
    fn table_url(&self, table: &str, extra: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/rest/v1/{}", self.base_url, table))
            .with_context(|| format!("invalid base url {}", self.base_url))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");
            if let Some(user_id) = &self.user_id {
                query.append_pair("user_id", &format!("eq.{user_id}"));
            }
            for (key, value) in extra {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn rows<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        extra: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = self.table_url(table, extra)?;
        let rows: Vec<T> = fetch_json(&self.client, url.as_str())
            .await
            .with_context(|| format!("fetching {table}"))?;
        debug!(table, rows = rows.len(), "Rows fetched");
        Ok(rows)
    }
}

#[async_trait]
impl<C: HttpClient> RecordSource for RestSource<C> {
    async fn fuel_records(&self) -> Result<Vec<FuelRecord>> {
        self.rows(FUEL_TABLE, &[("order", "date.asc")]).await
    }

    async fn service_records(&self) -> Result<Vec<ServiceRecord>> {
        self.rows(SERVICE_TABLE, &[("order", "date.asc")]).await
    }

    async fn vehicle(&self) -> Result<Option<VehicleProfile>> {
        let mut vehicles: Vec<VehicleProfile> = self.rows(VEHICLE_TABLE, &[("limit", "1")]).await?;
        Ok(vehicles.pop())
    }
}
