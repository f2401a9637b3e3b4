//! API error responses.
//!
//! Clients get a status code and a fixed message. The error chain goes to the
//! log only; upstream markup never leaves the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use magma::ScrapeError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error("invalid query parameter `{name}`")]
    InvalidParam { name: &'static str },
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Scrape(ScrapeError::Source(_)) | Self::InvalidParam { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Scrape(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Scrape(ScrapeError::Source(e)) => e.to_string(),
            Self::InvalidParam { .. } => self.to_string(),
            Self::Scrape(_) => "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "Request failed");
        }

        (
            status,
            Json(ErrorBody {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}
