use async_trait::async_trait;

use crate::error::FetchResult;

/// Retrieves raw markup for a URL.
///
/// Implementations report transport failures and non-success statuses as
/// `FetchError`; they never interpret the body.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}
