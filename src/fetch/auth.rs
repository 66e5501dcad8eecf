use crate::fetch::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that injects credential headers into every
/// request.
///
/// Header values are validated once at construction so sending never fails
/// on a malformed key.
pub struct ApiKey<C> {
    inner: C,
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl<C> ApiKey<C> {
    /// Supabase expects the project key in `apikey` and a bearer JWT. The
    /// anon key doubles as the bearer when there is no user session.
    pub fn supabase(inner: C, anon_key: &str, access_token: Option<&str>) -> Result<Self> {
        let apikey =
            HeaderValue::from_str(anon_key).context("anon key is not a valid header value")?;
        let bearer = bearer_value(access_token.unwrap_or(anon_key))?;

        Ok(Self {
            inner,
            headers: vec![(HeaderName::from_static("apikey"), apikey), (AUTHORIZATION, bearer)],
        })
    }
}

fn bearer_value(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .context("token is not a valid header value")?;
    value.set_sensitive(true);
    Ok(value)
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> Result<reqwest::Response> {
        for (name, value) in &self.headers {
            req.headers_mut().insert(name.clone(), value.clone());
        }
        self.inner.execute(req).await
    }
}
