use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::exercises::model::UnknownValue;

/// Malformed request input. Never retried, never answered with a fallback.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required parameter `{0}`")]
    Missing(&'static str),
    #[error("at least one {0} must be selected")]
    Empty(&'static str),
    #[error("duration must be a positive number of minutes")]
    NonPositiveDuration,
    #[error("invalid duration `{0}`, expected a whole number of minutes")]
    InvalidDuration(String),
    /// Body that is not valid JSON or does not fit the request shape.
    #[error("malformed request body: {0}")]
    Malformed(String),
    #[error(transparent)]
    Unknown(#[from] UnknownValue),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(e) = &self {
            error!(error = %e, "internal error");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
