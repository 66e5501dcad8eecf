use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes prepared HTTP requests. Decorators such as [`super::ApiKey`]
/// wrap another client to amend each request before it is sent.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> Result<Response>;
}
