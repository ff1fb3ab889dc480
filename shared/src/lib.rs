//! Shared types and models for the Skycast weather platform
//!
//! This crate contains types shared between the API service and the web
//! client facade: the forecast entity, the client-type claim, and the wire
//! DTOs both sides exchange.

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
