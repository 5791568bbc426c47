//! User persistence: SQL statements and the store seam handlers call through.

pub mod crud;
mod store;
pub use store::{PgUserStore, UserStore};
