//! Require a valid `API-KEY` header before the handler runs.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the shared secret (header names are case-insensitive on the wire).
pub const API_KEY_HEADER: &str = "api-key";

/// Proof that the request presented an accepted key. A missing header is treated as a wrong key.
#[derive(Clone, Copy, Debug)]
pub struct ApiKey;

#[async_trait]
impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if state.keys.check_key(presented) {
            Ok(ApiKey)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
