//! User CRUD service: four HTTP routes over a PostgreSQL `users` table.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod gateway;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use auth::{KeyCheck, StaticKey};
pub use config::{Bootstrap, DbSettings, Settings};
pub use error::{AppError, ConfigError};
pub use gateway::{Handle, StoreGateway};
pub use model::{User, UserKey};
pub use routes::{app, common_routes, user_routes};
pub use service::{PgUserStore, UserStore};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_users_table, log_users, reset_users_table, seed_users};
