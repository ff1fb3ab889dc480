//! Request middleware for the Skycast API

pub mod auth;

pub use auth::{auth_middleware, AuthClient, CurrentClient};
