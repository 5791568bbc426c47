//! User CRUD routes. Every path accepts exactly one method; anything else is 405.
//! `get` would also answer HEAD, so `/users` rejects it explicitly.

use crate::handlers::users::{create_user, delete_user, list_users, method_not_allowed, update_user};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users).head(method_not_allowed).fallback(method_not_allowed))
        .route("/newuser", post(create_user).fallback(method_not_allowed))
        .route("/userupdate", post(update_user).fallback(method_not_allowed))
        .route("/deleteuser", post(delete_user).fallback(method_not_allowed))
        .with_state(state)
}
