//! HTTP backend for the dashboard.

pub mod api_error;
pub mod raw_cache;
pub mod routes;
pub mod shutdown;

pub use routes::{AppState, router};
