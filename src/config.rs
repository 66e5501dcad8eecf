//! Tunables for the analytics core and connection settings for the remote
//! record store.

use anyhow::{Context, Result};
use serde::Deserialize;

/// A service type whose next occurrence is predicted from the last visit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceInterval {
    /// Must equal the record's `service_type` exactly.
    pub service_type: String,
    pub interval_miles: f64,
}

/// Constants used by the analytics computations.
///
/// Loaded from a JSON object on disk; omitted keys keep their defaults:
/// ```json
/// {
///   "tracked_services": [{ "service_type": "Oil Change", "interval_miles": 5000 }],
///   "average_daily_miles": 30
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub tracked_services: Vec<ServiceInterval>,
    /// Assumed miles driven per day when projecting service dates.
    pub average_daily_miles: f64,
    pub prediction_confidence: f64,
    /// Price spread per gallon above which shopping around is suggested.
    pub price_spread_threshold: f64,
    /// Fraction of the rated MPG below which driving habits are flagged.
    pub mpg_shortfall_ratio: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            tracked_services: vec![ServiceInterval {
                service_type: "Oil Change".to_string(),
                interval_miles: 5000.0,
            }],
            average_daily_miles: 30.0,
            prediction_confidence: 0.8,
            price_spread_threshold: 0.5,
            mpg_shortfall_ratio: 0.9,
        }
    }
}

impl AnalyticsConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        serde_json::from_str(&content).with_context(|| format!("parsing config {path}"))
    }
}

/// Connection settings for a PostgREST (Supabase) record store.
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub base_url: String,
    pub anon_key: String,
    /// User JWT; the anon key is sent as the bearer when absent.
    pub access_token: Option<String>,
    /// Scopes every query with `user_id=eq.<id>` when set.
    pub user_id: Option<String>,
}

impl RestConfig {
    /// Reads `SUPABASE_URL`, `SUPABASE_ANON_KEY`, and the optional
    /// `SUPABASE_ACCESS_TOKEN` / `SUPABASE_USER_ID`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?;
        let anon_key =
            std::env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY must be set")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            access_token: non_empty_var("SUPABASE_ACCESS_TOKEN"),
            user_id: non_empty_var("SUPABASE_USER_ID"),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
