//! The scraping service: fetch, parse, extract, enrich.

use std::sync::Arc;

use scraper::Html;
use tracing::debug;
use url::Url;

use crate::config::{AggregateConfig, SourceConfig};
use crate::dom;
use crate::enrichment::enrich;
use crate::error::{ParseResult, Result};
use crate::extractors::{
    extract, extract_daily_reports, extract_eruption_detail, extract_mountain_detail,
    extract_status_table, extract_timeline, DocumentShape, Extracted,
};
use crate::traits::{DocumentFetcher, MountainRegistry};
use crate::types::{
    ActivityLevelGroup, DailyReportRow, DetailMode, EruptionDetailReport, MountainDetailReport,
    TimelineDay, TimelineKind,
};

/// Entry point for every scrape operation.
///
/// Cheap to clone; collaborators are shared behind `Arc`.
#[derive(Clone)]
pub struct Magma {
    pub(crate) fetcher: Arc<dyn DocumentFetcher>,
    pub(crate) registry: Arc<dyn MountainRegistry>,
    pub(crate) sources: SourceConfig,
    pub(crate) aggregate: AggregateConfig,
}

impl Magma {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        registry: Arc<dyn MountainRegistry>,
        sources: SourceConfig,
    ) -> Self {
        Self {
            fetcher,
            registry,
            sources,
            aggregate: AggregateConfig::default(),
        }
    }

    pub fn with_aggregate_config(mut self, aggregate: AggregateConfig) -> Self {
        self.aggregate = aggregate;
        self
    }

    pub fn sources(&self) -> &SourceConfig {
        &self.sources
    }

    pub fn aggregate_config(&self) -> &AggregateConfig {
        &self.aggregate
    }

    /// Eruption notices, grouped by day.
    pub async fn eruption_timeline(&self, page: u32) -> Result<Vec<TimelineDay>> {
        let url = self.sources.eruption_timeline_url(page);
        self.scrape_with(&url, |doc| extract_timeline(doc, TimelineKind::EruptionInfo))
            .await
    }

    /// Activity reports, grouped by day.
    pub async fn activity_timeline(&self, page: u32) -> Result<Vec<TimelineDay>> {
        let url = self.sources.activity_timeline_url(page);
        self.scrape_with(&url, |doc| extract_timeline(doc, TimelineKind::ActivityReport))
            .await
    }

    pub async fn daily_reports(&self) -> Result<Vec<DailyReportRow>> {
        let url = self.sources.daily_report_url();
        self.scrape_with(&url, extract_daily_reports).await
    }

    /// Current activity levels and the mountains listed under each.
    pub async fn activity_levels(&self) -> Result<Vec<ActivityLevelGroup>> {
        let url = self.sources.status_table_url();
        self.scrape_with(&url, extract_status_table).await
    }

    /// Mountain activity report, with registry coordinates when known.
    pub async fn mountain_detail(&self, link: &str, mode: DetailMode) -> Result<MountainDetailReport> {
        let url = self.sources.resolve_detail_url(link)?;
        let report = self.mountain_report(&url, mode).await?;
        Ok(enrich(self.registry.as_ref(), report).await?)
    }

    /// Eruption notice, with registry coordinates when known.
    pub async fn eruption_detail(&self, link: &str) -> Result<EruptionDetailReport> {
        let url = self.sources.resolve_detail_url(link)?;
        let report = self.scrape_with(url.as_str(), extract_eruption_detail).await?;
        Ok(enrich(self.registry.as_ref(), report).await?)
    }

    /// Fetch `url` and run the extractor for `shape`, without enrichment.
    pub async fn scrape(&self, shape: DocumentShape, url: &str) -> Result<Extracted> {
        self.scrape_with(url, |doc| extract(doc, shape)).await
    }

    /// Detail report without registry lookup.
    pub(crate) async fn mountain_report(
        &self,
        url: &Url,
        mode: DetailMode,
    ) -> Result<MountainDetailReport> {
        self.scrape_with(url.as_str(), |doc| extract_mountain_detail(doc, mode))
            .await
    }

    async fn scrape_with<T, F>(&self, url: &str, extractor: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&Html) -> ParseResult<T> + Send,
    {
        let markup = self.fetcher.fetch(url).await?;
        let record = parse_and_extract(&markup, extractor)?;
        debug!(url = %url, "Document extracted");
        Ok(record)
    }
}

// Keeps the parsed tree out of any future's state.
fn parse_and_extract<T>(markup: &str, extractor: impl FnOnce(&Html) -> ParseResult<T>) -> ParseResult<T> {
    let doc = dom::parse(markup);
    extractor(&doc)
}

impl std::fmt::Debug for Magma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Magma")
            .field("base_url", &self.sources.base_url().as_str())
            .field("aggregate", &self.aggregate)
            .finish()
    }
}
