//! User handlers: list, create, update, delete.
//! Write routes answer 201 with the decoded request body echoed back.

use crate::error::AppError;
use crate::extractors::{ApiKey, JsonBody};
use crate::model::{User, UserKey};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.store.list().await?;
    tracing::debug!(count = users.len(), "listed users");
    Ok(Json(users))
}

/// POST /newuser (requires `API-KEY`)
pub async fn create_user(
    State(state): State<AppState>,
    _key: ApiKey,
    JsonBody(user): JsonBody<User>,
) -> Result<(StatusCode, Json<User>), AppError> {
    state.store.create(&user).await?;
    tracing::info!(username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /userupdate
pub async fn update_user(
    State(state): State<AppState>,
    JsonBody(user): JsonBody<User>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let affected = state.store.update(&user).await?;
    if affected == 0 {
        tracing::warn!(id = user.id, "update matched no user");
    } else {
        tracing::info!(id = user.id, "user updated");
    }
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /deleteuser
pub async fn delete_user(
    State(state): State<AppState>,
    JsonBody(key): JsonBody<UserKey>,
) -> Result<(StatusCode, Json<UserKey>), AppError> {
    let affected = state.store.delete(key.id).await?;
    if affected == 0 {
        tracing::warn!(id = key.id, "delete matched no user");
    } else {
        tracing::info!(id = key.id, "user deleted");
    }
    Ok((StatusCode::CREATED, Json(key)))
}

/// Fallback for a known path hit with the wrong verb.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
