use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes HTTP requests for the loader. Implemented by [`super::BasicClient`]; swap in
/// another implementation to add headers, retries or a test double.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
