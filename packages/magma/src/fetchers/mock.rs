//! Mock fetcher for testing.
//!
//! Serves canned markup by URL and records what was requested.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{FetchError, FetchResult};
use crate::traits::DocumentFetcher;

/// Canned response for one URL.
#[derive(Debug, Clone)]
enum MockResponse {
    Page(String),
    Status(u16),
}

/// Mock fetcher for testing.
///
/// Unknown URLs answer with HTTP 404. An optional delay makes every fetch
/// take at least that long, which lets tests observe how many fetches were
/// in flight at once.
///
/// ```rust
/// use magma::fetchers::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_page("https://magma.test/v1/gunung-api/tingkat-aktivitas", "<table></table>");
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    default_delay: Option<Duration>,
    calls: Arc<RwLock<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `markup` for `url`.
    pub fn add_page(&self, url: impl Into<String>, markup: impl Into<String>) {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Page(markup.into()));
    }

    /// Answer `url` with a non-success status.
    pub fn add_status(&self, url: impl Into<String>, status: u16) {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Status(status));
    }

    /// Hold the response for `url` for `delay`.
    pub fn add_delay(&self, url: impl Into<String>, delay: Duration) {
        self.delays.write().unwrap().insert(url.into(), delay);
    }

    pub fn with_page(self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.add_page(url, markup);
        self
    }

    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.add_status(url, status);
        self
    }

    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.add_delay(url, delay);
        self
    }

    /// Delay applied to URLs without their own delay.
    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = Some(delay);
        self
    }

    /// Number of fetches performed.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// URLs requested, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of times `url` was requested.
    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.read().unwrap().iter().filter(|c| *c == url).count()
    }

    /// Highest number of fetches observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn delay_for(&self, url: &str) -> Option<Duration> {
        self.delays
            .read()
            .unwrap()
            .get(url)
            .copied()
            .or(self.default_delay)
    }
}

/// Decrements the in-flight counter even when the fetch future is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        if let Some(delay) = self.delay_for(url) {
            tokio::time::sleep(delay).await;
        }

        let response = self.responses.read().unwrap().get(url).cloned();
        match response {
            Some(MockResponse::Page(markup)) => Ok(markup),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_pages_and_records_calls() {
        let mock = MockFetcher::new()
            .with_page("https://a.test/1", "<p>satu</p>")
            .with_status("https://a.test/2", 503);

        assert_eq!(mock.fetch("https://a.test/1").await.unwrap(), "<p>satu</p>");
        assert!(matches!(
            mock.fetch("https://a.test/2").await,
            Err(FetchError::Status { status: 503, .. })
        ));
        assert!(matches!(
            mock.fetch("https://a.test/3").await,
            Err(FetchError::Status { status: 404, .. })
        ));

        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.calls_to("https://a.test/1"), 1);
        assert_eq!(mock.max_in_flight(), 1);
    }
}
