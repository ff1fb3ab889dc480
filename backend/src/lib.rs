//! Skycast weather platform - API service
//!
//! HTTP control plane for the weather forecast sample:
//! - API-key-to-JWT token issuance for registered clients
//! - Bearer-protected forecast retrieval with get-or-create semantics
//! - Health reporting with per-check timings

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod services;

pub use config::Config;
pub use routes::create_app;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
}
