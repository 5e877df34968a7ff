use async_trait::async_trait;
use reqwest::{Request, Response};

/// Transport seam for [`HttpSource`](crate::dataset::HttpSource), so the
/// document fetch can be wrapped or replaced.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
