//! Forecast retrieval through the authenticated transport
//!
//! Transport failures degrade to an empty result so the UI never crashes;
//! caller cancellation is re-signaled, never swallowed.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::auth::AuthenticationService;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::Transport;
use shared::models::{ForecastResponse, WeatherForecast};

/// Upper bound on entries handed to the UI
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Client for the forecast endpoint
pub struct WeatherApiClient {
    transport: Arc<Transport>,
    auth: Arc<AuthenticationService>,
    base_url: String,
    max_items: usize,
}

impl WeatherApiClient {
    pub fn new(
        config: &ClientConfig,
        transport: Arc<Transport>,
        auth: Arc<AuthenticationService>,
    ) -> Self {
        Self {
            transport,
            auth,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }

    /// Build the full client stack (transport, auth, weather client) from
    /// configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        let transport = Arc::new(Transport::new(
            &config.transport.timeouts(),
            config.transport.retry(),
            config.transport.circuit_breaker(),
        ));
        let auth = Arc::new(AuthenticationService::new(config, transport.clone()));
        Self::new(config, transport, auth)
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Fetch the forecast window.
    ///
    /// Network errors, error statuses, and malformed payloads are logged
    /// and mapped to an empty result. Cancellation drops the in-flight
    /// request and surfaces as [`ClientError::Cancelled`].
    pub async fn get_forecasts(
        &self,
        cancel: CancellationToken,
    ) -> Result<Vec<WeatherForecast>, ClientError> {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                tracing::info!("Weather forecast request was cancelled");
                Err(ClientError::Cancelled)
            }
            result = self.fetch() => match result {
                Ok(forecasts) => Ok(forecasts),
                Err(err) => {
                    tracing::error!("Failed to fetch weather forecasts: {}", err);
                    Ok(Vec::new())
                }
            },
        }
    }

    async fn fetch(&self) -> Result<Vec<WeatherForecast>, ClientError> {
        let url = format!("{}/weatherforecast", self.base_url);

        let response = self
            .transport
            .execute(|| async {
                let request = self.transport.client().get(&url);
                let request = self.auth.authorize(request).await;
                request.send().await
            })
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::UnexpectedStatus(response.status()));
        }

        let entries = response
            .json::<Vec<ForecastResponse>>()
            .await
            .map_err(|e| ClientError::Payload(e.to_string()))?;

        Ok(entries
            .into_iter()
            .take(self.max_items)
            .map(WeatherForecast::from)
            .collect())
    }
}
