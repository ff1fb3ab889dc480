//! Business logic services for the Skycast API

pub mod auth;
pub mod weather;

pub use auth::AuthService;
pub use weather::WeatherService;
