//! Mapping of request failures onto HTTP responses

use crate::models::ErrorResponse;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::string::FromUtf8Error;
use tracing::error;
use yoda_mqa::MqaError;

/// Failure of a request handler, always rendered as `{"error": ...}`.
///
/// Validator failures keep the validator's status code and rejected bodies
/// keep the rejection's status; everything else is a 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Evaluation(#[from] MqaError),

    #[error("{message}")]
    Body { status: StatusCode, message: String },

    #[error("Request body is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Evaluation(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Body { status, .. } => *status,
            ApiError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(status = status.as_u16(), error = %self, "request failed");
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
