// src/lib.rs
// Public library surface shared by the server, the CLI and integration tests.

pub mod alerts;
pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod providers;
pub mod recommend;

// `crop_advisor::api::router` and `crop_advisor::router` both work
pub use crate::api::{router, AppState};
pub use crate::error::{AdvisorError, AdvisorResult};
