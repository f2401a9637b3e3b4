//! Map aggregate: every listed mountain joined with its detail summary and
//! registry coordinates.
//!
//! One status-table fetch and one registry read, then a bounded fan-out of
//! map-summary detail fetches. Results come back in listing order.

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

use crate::client::Magma;
use crate::config::FailurePolicy;
use crate::enrichment::RegistryIndex;
use crate::error::{FetchError, Result};
use crate::types::{
    AggregateGroup, AggregateReport, DetailMode, EnrichedMount, MountEnrichment, MountFailure,
    MountRef, MountainDetailReport,
};

impl Magma {
    /// Build the map aggregate.
    ///
    /// Under [`FailurePolicy::BestEffort`] a mountain whose detail page fails
    /// is kept without enrichment and listed in [`AggregateReport::failures`].
    /// Under [`FailurePolicy::FailFast`] the first failure is returned and
    /// outstanding fetches are dropped.
    pub async fn aggregate(&self) -> Result<AggregateReport> {
        let groups = self.activity_levels().await?;
        let index = RegistryIndex::new(self.registry.all().await?);

        let total: usize = groups.iter().map(|g| g.mounts.len()).sum();
        info!(
            groups = groups.len(),
            mountains = total,
            registered = index.len(),
            concurrency = self.aggregate.concurrency,
            "Aggregating activity levels"
        );

        let links: Vec<String> = groups
            .iter()
            .flat_map(|group| group.mounts.iter().map(|mount| mount.link.clone()))
            .collect();
        let fetches = stream::iter(links)
            .map(|link| self.map_summary(link))
            .buffered(self.aggregate.concurrency.max(1));

        let outcomes: Vec<Result<MountainDetailReport>> = match self.aggregate.policy {
            FailurePolicy::BestEffort => fetches.collect().await,
            FailurePolicy::FailFast => fetches
                .try_collect::<Vec<_>>()
                .await?
                .into_iter()
                .map(Ok)
                .collect(),
        };

        let mut outcomes = outcomes.into_iter();
        let mut report = AggregateReport {
            groups: Vec::with_capacity(groups.len()),
            failures: Vec::new(),
        };

        for group in groups {
            let mut aggregated = AggregateGroup::header(&group);

            for (mount, outcome) in group.mounts.into_iter().zip(outcomes.by_ref()) {
                let enriched = match outcome {
                    Ok(detail) => join_mount(&index, &aggregated.status, mount, detail),
                    Err(error) => {
                        warn!(
                            mountain = %mount.name,
                            link = %mount.link,
                            error = %error,
                            "Detail scrape failed, keeping mountain without enrichment"
                        );
                        report.failures.push(MountFailure {
                            name: mount.name.clone(),
                            link: mount.link.clone(),
                            error,
                        });
                        EnrichedMount::bare(mount)
                    }
                };
                aggregated.mounts.push(enriched);
            }

            report.groups.push(aggregated);
        }

        info!(
            mountains = total,
            enriched = report.mounts().filter(|m| m.enrichment.is_some()).count(),
            failed = report.failures.len(),
            "Aggregation complete"
        );

        Ok(report)
    }

    async fn map_summary(&self, link: String) -> Result<MountainDetailReport> {
        let url = self.sources.resolve_detail_url(&link)?;
        let fetch = self.mountain_report(&url, DetailMode::MapSummary);

        match tokio::time::timeout(self.aggregate.fetch_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
            }
            .into()),
        }
    }
}

/// Attach coordinates and the report body when the registry knows the name
/// from the detail page.
fn join_mount(
    index: &RegistryIndex,
    status: &str,
    mount: MountRef,
    detail: MountainDetailReport,
) -> EnrichedMount {
    match index.lookup(&detail.name) {
        Some(mountain) => EnrichedMount {
            mount,
            enrichment: Some(MountEnrichment {
                status: status.to_string(),
                location: mountain.geolocation(),
                report: detail.report,
            }),
        },
        None => {
            debug!(mountain = %detail.name, "No registry match");
            EnrichedMount::bare(mount)
        }
    }
}
