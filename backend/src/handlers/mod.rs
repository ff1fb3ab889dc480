//! HTTP handlers for the Skycast API

pub mod auth;
pub mod health;
pub mod weather;

pub use auth::issue_token;
pub use health::health_check;
pub use weather::get_weather_forecast;
