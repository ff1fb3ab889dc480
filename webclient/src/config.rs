//! Configuration for the web client facade
//!
//! Defaults in code, overridable with SKYCAST_WEB-prefixed environment
//! variables.

use std::time::Duration;

use config::{ConfigError, Environment};
use serde::Deserialize;

use crate::transport::{CircuitBreakerConfig, RetryConfig, TransportConfig};

/// Web client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of the forecast API
    pub base_url: String,

    /// API key presented during the token exchange
    pub api_key: String,

    /// Client identifier the key is registered to
    pub client_id: String,

    /// Resilience knobs handed to the transport
    pub transport: TransportSettings,
}

/// Flat transport settings as they appear in configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TransportSettings {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_initial_delay_ms: u64,
    pub retry_max_delay_ms: u64,
    pub circuit_failure_threshold: u32,
    pub circuit_reset_secs: u64,
}

impl TransportSettings {
    pub fn timeouts(&self) -> TransportConfig {
        TransportConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            initial_delay: Duration::from_millis(self.retry_initial_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }

    pub fn circuit_breaker(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_threshold: self.circuit_failure_threshold,
            reset_after: Duration::from_secs(self.circuit_reset_secs),
        }
    }
}

impl ClientConfig {
    /// Load configuration from defaults and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .set_default("base_url", "http://localhost:3000")?
            .set_default("api_key", "web-app-api-key-1234567890")?
            .set_default("client_id", "web-client")?
            .set_default("transport.request_timeout_secs", 15)?
            .set_default("transport.connect_timeout_secs", 5)?
            .set_default("transport.max_retries", 3)?
            .set_default("transport.retry_initial_delay_ms", 100)?
            .set_default("transport.retry_max_delay_ms", 5000)?
            .set_default("transport.circuit_failure_threshold", 5)?
            .set_default("transport.circuit_reset_secs", 30)?
            .add_source(
                Environment::with_prefix("SKYCAST_WEB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
