//! Skycast web client facade
//!
//! The web front end's access path to the forecast API: token acquisition
//! and caching, bearer attachment, a configurable resilient transport, and
//! graceful degradation so the UI never crashes on transport failures.

pub mod auth;
pub mod config;
pub mod error;
pub mod transport;
pub mod weather;

pub use auth::AuthenticationService;
pub use config::ClientConfig;
pub use error::ClientError;
pub use transport::Transport;
pub use weather::WeatherApiClient;
