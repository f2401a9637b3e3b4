//! Records produced by the extractors.
//!
//! Every record is built fresh per request. Field names on the wire follow
//! the Indonesian vocabulary of the source site (`laporan`, `gempa`, ...).

pub mod activity;
pub mod aggregate;
pub mod daily;
pub mod detail;
pub mod mountain;
pub mod timeline;

pub use activity::{ActivityLevelGroup, MountRef};
pub use aggregate::{AggregateGroup, AggregateReport, EnrichedMount, MountEnrichment, MountFailure};
pub use daily::{CellValue, DailyReportRow};
pub use detail::{DetailBody, DetailMode, EruptionDetailReport, MountainDetailReport};
pub use mountain::{GeocodedMountain, Geolocation};
pub use timeline::{ActivityReportEntry, EruptionInfoEntry, TimelineDay, TimelineEntry, TimelineKind};
