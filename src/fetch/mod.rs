//! HTTP plumbing for remote record sources.

mod auth;
mod basic;
mod client;

pub use auth::ApiKey;
pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;

/// Issues a GET and decodes the JSON body. Non-success statuses become
/// errors carrying the status and response body.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(client: &C, url: &str) -> Result<T> {
    let mut req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid url {url}"))?,
    );
    req.headers_mut().insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let resp = client.execute(req).await?;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow!("{url} returned status {status}: {body}"));
    }

    resp.json()
        .await
        .with_context(|| format!("failed to decode response from {url}"))
}
