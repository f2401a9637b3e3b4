use serde::{Deserialize, Serialize};

use super::activity::{ActivityLevelGroup, MountRef};
use super::detail::DetailBody;
use super::mountain::Geolocation;
use crate::error::ScrapeError;

/// Map-ready result of the aggregator, serialized as `{"aktivitas": [...]}`.
#[derive(Debug, Serialize)]
pub struct AggregateReport {
    #[serde(rename = "aktivitas")]
    pub groups: Vec<AggregateGroup>,
    /// Detail fetches that failed under the best-effort policy
    #[serde(skip)]
    pub failures: Vec<MountFailure>,
}

impl AggregateReport {
    pub fn mounts(&self) -> impl Iterator<Item = &EnrichedMount> {
        self.groups.iter().flat_map(|group| group.mounts.iter())
    }

    pub fn find(&self, name: &str) -> Option<&EnrichedMount> {
        self.mounts().find(|mount| mount.mount.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateGroup {
    pub status: String,
    pub description: String,
    pub count: u32,
    pub mounts: Vec<EnrichedMount>,
}

impl AggregateGroup {
    /// Copy the group header; mounts are filled in by the aggregator.
    pub fn header(group: &ActivityLevelGroup) -> Self {
        Self {
            status: group.status.clone(),
            description: group.description.clone(),
            count: group.count,
            mounts: Vec::with_capacity(group.mounts.len()),
        }
    }
}

/// A listed mountain, plus registry and report data when it could be matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMount {
    #[serde(flatten)]
    pub mount: MountRef,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<MountEnrichment>,
}

impl EnrichedMount {
    pub fn bare(mount: MountRef) -> Self {
        Self {
            mount,
            enrichment: None,
        }
    }

    pub fn geolocation(&self) -> Option<&Geolocation> {
        self.enrichment.as_ref().map(|e| &e.location)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountEnrichment {
    pub status: String,
    #[serde(flatten)]
    pub location: Geolocation,
    #[serde(rename = "laporan")]
    pub report: DetailBody,
}

/// A mountain whose detail page could not be scraped.
#[derive(Debug)]
pub struct MountFailure {
    pub name: String,
    pub link: String,
    pub error: ScrapeError,
}
