//! Source and aggregation settings.

use std::time::Duration;
use url::Url;

use crate::error::SourceError;

pub const DEFAULT_BASE_URL: &str = "https://magma.esdm.go.id/v1/gunung-api/";

const ERUPTION_TIMELINE_PATH: &str = "informasi-letusan";
const ACTIVITY_TIMELINE_PATH: &str = "laporan";
const DAILY_REPORT_PATH: &str = "laporan-harian";
const STATUS_TABLE_PATH: &str = "tingkat-aktivitas";

/// Where documents come from.
///
/// Listing pages live under `base_url`. Detail pages are only fetched from
/// the base host or one of `extra_hosts`.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    base_url: Url,
    extra_hosts: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            extra_hosts: Vec::new(),
        }
    }
}

impl SourceConfig {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let invalid = || SourceError::InvalidUrl {
            url: base_url.to_string(),
        };

        // Joining relative paths replaces the last segment unless the base
        // ends with a slash.
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let base_url = Url::parse(&normalized).map_err(|_| invalid())?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.host_str().is_none() {
            return Err(invalid());
        }

        Ok(Self {
            base_url,
            extra_hosts: Vec::new(),
        })
    }

    /// Also accept detail URLs on `host`.
    pub fn with_allowed_host(mut self, host: impl Into<String>) -> Self {
        self.extra_hosts.push(host.into().to_lowercase());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn eruption_timeline_url(&self, page: u32) -> String {
        self.page_url(ERUPTION_TIMELINE_PATH, page)
    }

    pub fn activity_timeline_url(&self, page: u32) -> String {
        self.page_url(ACTIVITY_TIMELINE_PATH, page)
    }

    pub fn daily_report_url(&self) -> String {
        self.endpoint(DAILY_REPORT_PATH).to_string()
    }

    pub fn status_table_url(&self) -> String {
        self.endpoint(STATUS_TABLE_PATH).to_string()
    }

    /// Resolve a detail link against the base URL and check its host.
    ///
    /// Absolute links are taken as-is; relative links resolve under the base.
    pub fn resolve_detail_url(&self, link: &str) -> Result<Url, SourceError> {
        let invalid = || SourceError::InvalidUrl {
            url: link.to_string(),
        };

        let url = self.base_url.join(link.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }

        let host = url.host_str().ok_or_else(invalid)?.to_lowercase();
        if !self.is_allowed_host(&host) {
            return Err(SourceError::ForeignHost { host });
        }

        Ok(url)
    }

    fn is_allowed_host(&self, host: &str) -> bool {
        self.base_url
            .host_str()
            .is_some_and(|base| base.eq_ignore_ascii_case(host))
            || self.extra_hosts.iter().any(|h| h == host)
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map(|mut segments| {
                segments.pop_if_empty().push(path);
            })
            .ok();
        url
    }

    fn page_url(&self, path: &str, page: u32) -> String {
        let mut url = self.endpoint(path);
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url.to_string()
    }
}

/// What to do when one mountain's detail page cannot be scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep the mountain without enrichment and record the failure.
    #[default]
    BestEffort,
    /// Abort the whole aggregation on the first failure.
    FailFast,
}

/// Limits for the aggregation fan-out.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Maximum detail fetches in flight (default: 8)
    pub concurrency: usize,
    /// Time allowed for each detail fetch (default: 15s)
    pub fetch_timeout: Duration,
    pub policy: FailurePolicy,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            fetch_timeout: Duration::from_secs(15),
            policy: FailurePolicy::BestEffort,
        }
    }
}

impl AggregateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}
