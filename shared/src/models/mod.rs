//! Data models for the Skycast weather platform

pub mod forecast;

pub use forecast::*;
