//! Forecast persistence for the Skycast API service

pub mod forecast;

pub use forecast::{ForecastStore, PgForecastStore, StoreError};
