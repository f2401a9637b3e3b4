//! Shape extractors: stateless transforms from a parsed page to records.
//!
//! Each source page has one of a few known layouts. The caller says which
//! layout it fetched; nothing here guesses from the markup.

mod daily_report;
mod eruption_detail;
mod mountain_detail;
mod status_table;
mod timeline;

use scraper::Html;
use serde::Serialize;

pub use daily_report::extract_daily_reports;
pub use eruption_detail::extract_eruption_detail;
pub use mountain_detail::{extract_mountain_detail, parse_title, CardDeck, FullCards, ReportTitle};
pub use status_table::extract_status_table;
pub use timeline::extract_timeline;

use crate::error::ParseResult;
use crate::types::{
    ActivityLevelGroup, DailyReportRow, DetailMode, EruptionDetailReport, MountainDetailReport,
    TimelineDay, TimelineKind,
};

/// The page layouts the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    Timeline(TimelineKind),
    StatusTable,
    DailyReportTable,
    MountainDetail(DetailMode),
    EruptionDetail,
}

/// Output of [`extract`], one variant per shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Extracted {
    Timeline(Vec<TimelineDay>),
    StatusTable(Vec<ActivityLevelGroup>),
    DailyReportTable(Vec<DailyReportRow>),
    MountainDetail(Box<MountainDetailReport>),
    EruptionDetail(Box<EruptionDetailReport>),
}

/// Run the extractor for `shape`.
pub fn extract(doc: &Html, shape: DocumentShape) -> ParseResult<Extracted> {
    Ok(match shape {
        DocumentShape::Timeline(kind) => Extracted::Timeline(extract_timeline(doc, kind)?),
        DocumentShape::StatusTable => Extracted::StatusTable(extract_status_table(doc)?),
        DocumentShape::DailyReportTable => {
            Extracted::DailyReportTable(extract_daily_reports(doc)?)
        }
        DocumentShape::MountainDetail(mode) => {
            Extracted::MountainDetail(Box::new(extract_mountain_detail(doc, mode)?))
        }
        DocumentShape::EruptionDetail => {
            Extracted::EruptionDetail(Box::new(extract_eruption_detail(doc)?))
        }
    })
}
