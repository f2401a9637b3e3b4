use serde::{Deserialize, Serialize};

use super::mountain::Geolocation;

/// How much of a mountain detail page to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailMode {
    /// Every narrative field
    #[default]
    Full,
    /// Image and visual summary only, for map tooltips
    MapSummary,
}

/// Activity report for one mountain (`data-laporan-aktivitas`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountainDetailReport {
    pub level: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<String>,
    #[serde(rename = "laporan")]
    pub report: DetailBody,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub location: Option<Geolocation>,
}

/// Card contents of a mountain detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailBody {
    pub image: String,
    pub visual: String,
    #[serde(rename = "klimatologi", skip_serializing_if = "Option::is_none")]
    pub climatology: Option<String>,
    #[serde(rename = "gempa", skip_serializing_if = "Option::is_none")]
    pub seismicity: Option<Vec<String>>,
    #[serde(rename = "rekomendasi", skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

/// Eruption notice detail (`data-laporan-letusan`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EruptionDetailReport {
    pub image: String,
    pub date: String,
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(rename = "rekomendasi")]
    pub recommendations: Vec<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub location: Option<Geolocation>,
}
