//! Volcano activity endpoints.
//!
//! Everything but `/mapbox` answers with a `{"data": ...}` envelope.

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use magma::{
    ActivityLevelGroup, AggregateReport, DailyReportRow, DetailMode, EruptionDetailReport,
    MountainDetailReport, TimelineDay,
};

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

type ApiResult<T> = Result<Json<DataEnvelope<T>>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

impl PageQuery {
    /// Page number, 1 when absent.
    fn page(&self) -> Result<u32, ApiError> {
        match self.page {
            None => Ok(1),
            Some(0) => Err(ApiError::InvalidParam { name: "page" }),
            Some(page) => Ok(page),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub url: String,
    /// Map-summary mode when true
    #[serde(default)]
    pub map: bool,
}

/// GET /informasi-letusan?page=N
pub async fn eruption_timeline_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<TimelineDay>> {
    let days = state.magma.eruption_timeline(query.page()?).await?;
    Ok(DataEnvelope::new(days))
}

/// GET /laporan?page=N
pub async fn activity_timeline_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<TimelineDay>> {
    let days = state.magma.activity_timeline(query.page()?).await?;
    Ok(DataEnvelope::new(days))
}

/// GET /laporan-harian
pub async fn daily_report_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Vec<DailyReportRow>> {
    Ok(DataEnvelope::new(state.magma.daily_reports().await?))
}

/// GET /tingkat-aktivitas
pub async fn activity_level_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Vec<ActivityLevelGroup>> {
    Ok(DataEnvelope::new(state.magma.activity_levels().await?))
}

/// GET /data-laporan-aktivitas?url=U&map=true|false
pub async fn mountain_detail_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<DetailQuery>,
) -> ApiResult<MountainDetailReport> {
    let mode = if query.map {
        DetailMode::MapSummary
    } else {
        DetailMode::Full
    };
    let report = state.magma.mountain_detail(&query.url, mode).await?;
    Ok(DataEnvelope::new(report))
}

/// GET /data-laporan-letusan?url=U
pub async fn eruption_detail_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<DetailQuery>,
) -> ApiResult<EruptionDetailReport> {
    let report = state.magma.eruption_detail(&query.url).await?;
    Ok(DataEnvelope::new(report))
}

/// GET /mapbox
pub async fn mapbox_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<AggregateReport>, ApiError> {
    let report = state.magma.aggregate().await?;
    if !report.failures.is_empty() {
        info!(
            failed = report.failures.len(),
            "Map aggregate served with unenriched mountains"
        );
    }
    Ok(Json(report))
}
