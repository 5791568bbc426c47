//! Request extractors shared by the user handlers.

pub mod api_key;
pub mod json;

pub use api_key::{ApiKey, API_KEY_HEADER};
pub use json::JsonBody;
