//! Shared application state for all routes. Read-only after startup.

use crate::auth::KeyCheck;
use crate::service::UserStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    /// Checks the `API-KEY` header on the create route.
    pub keys: Arc<dyn KeyCheck>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, keys: Arc<dyn KeyCheck>) -> Self {
        AppState { store, keys }
    }
}
