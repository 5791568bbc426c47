//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Store unreachable, credentials rejected, or no pooled handle available in time.
    #[error("connection: {0}")]
    Connection(sqlx::Error),
    /// Statement or row decode failure.
    #[error("query: {0}")]
    Query(sqlx::Error),
    #[error("decode: {0}")]
    Decode(String),
    #[error("missing or invalid API key")]
    Unauthorized,
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_connection_error(&e) {
            AppError::Connection(e)
        } else {
            AppError::Query(e)
        }
    }
}

fn is_connection_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
    )
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Connection(_) => "store_unavailable",
            AppError::Query(_) => "store_error",
            AppError::Decode(_) => "bad_request",
            AppError::Unauthorized => "unauthorized",
            AppError::MethodNotAllowed => "method_not_allowed",
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Connection(_) | AppError::Query(_) => {
                tracing::error!(error = %self, "store failure");
            }
            AppError::Decode(detail) => tracing::debug!(%detail, "rejected request body"),
            AppError::Unauthorized | AppError::MethodNotAllowed => {
                tracing::debug!(status = status.as_u16(), "rejected request");
            }
        }
        // Only the status text goes to the client; store errors may carry SQL or host details.
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: status.canonical_reason().unwrap_or("Error").to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
