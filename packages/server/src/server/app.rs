//! Application setup and server configuration.

use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use magma::Magma;

use crate::server::routes::{
    activity_level_handler, activity_timeline_handler, daily_report_handler,
    eruption_detail_handler, eruption_timeline_handler, health_handler, mapbox_handler,
    mountain_detail_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub magma: Magma,
    /// Registry database, checked by `/health` when present
    pub db_pool: Option<PgPool>,
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String], request_timeout: Duration) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/informasi-letusan", get(eruption_timeline_handler))
        .route("/laporan", get(activity_timeline_handler))
        .route("/laporan-harian", get(daily_report_handler))
        .route("/tingkat-aktivitas", get(activity_level_handler))
        .route("/data-laporan-aktivitas", get(mountain_detail_handler))
        .route("/data-laporan-letusan", get(eruption_detail_handler))
        .route("/mapbox", get(mapbox_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
