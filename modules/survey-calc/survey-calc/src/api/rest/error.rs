//! REST error mapping for the Survey Calc module.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::dto::ErrorResponse;
use crate::domain::error::DomainError;

/// Every failure a calculation request can end in. All of them render as
/// `{"error": "..."}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Invalid calculation type")]
    UnknownOperation,

    #[error("{0}")]
    BadRequest(String),

    /// The JSON extractor refused the body (syntax, content type, size).
    #[error("{message}")]
    Rejection { status: StatusCode, message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejection { status, .. } => *status,
            Self::UnknownOperation | Self::BadRequest(_) | Self::Domain(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejection {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "calculation request rejected");
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
