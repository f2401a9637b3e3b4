use serde::{Deserialize, Serialize};

/// Which timeline page a document came from.
///
/// Decides the entry variant; entries are never classified by inspecting
/// which fields happen to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    /// `laporan` - periodic activity reports
    ActivityReport,
    /// `informasi-letusan` - eruption notices
    EruptionInfo,
}

/// Entries grouped under one day marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineDay {
    pub date: String,
    pub children: Vec<TimelineEntry>,
}

impl TimelineDay {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEntry {
    ActivityReport(ActivityReportEntry),
    EruptionInfo(EruptionInfoEntry),
}

impl TimelineEntry {
    pub fn time(&self) -> &str {
        match self {
            Self::ActivityReport(entry) => &entry.time,
            Self::EruptionInfo(entry) => &entry.time,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::ActivityReport(entry) => &entry.title,
            Self::EruptionInfo(entry) => &entry.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReportEntry {
    pub time: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EruptionInfoEntry {
    pub time: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
