//! Token acquisition and caching for the forecast API
//!
//! Single-variable state machine over a cached token: the cached value is
//! reused until five minutes before its expiry, then a fresh exchange
//! replaces it wholesale. A failed exchange leaves the cache empty and the
//! caller proceeds unauthenticated.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use reqwest::RequestBuilder;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::Transport;
use shared::types::{TokenRequest, TokenResponse};

/// Tokens are considered unusable this long before their actual expiry
const REFRESH_MARGIN_MINUTES: i64 = 5;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expiration: DateTime<Utc>,
}

impl CachedToken {
    fn is_usable(&self, now: DateTime<Utc>) -> bool {
        now < self.expiration - Duration::minutes(REFRESH_MARGIN_MINUTES)
    }
}

/// Acquires and caches access tokens for the forecast API
pub struct AuthenticationService {
    transport: Arc<Transport>,
    base_url: String,
    api_key: String,
    client_id: String,
    // The lock is never held across an await: two simultaneous first calls
    // may both exchange, a duplicated cost rather than a correctness hazard.
    cached: Mutex<Option<CachedToken>>,
}

impl AuthenticationService {
    pub fn new(config: &ClientConfig, transport: Arc<Transport>) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client_id: config.client_id.clone(),
            cached: Mutex::new(None),
        }
    }

    /// Return a usable access token, exchanging credentials when the cache
    /// is empty or inside the refresh margin.
    ///
    /// `None` means no token could be acquired; the caller proceeds
    /// unauthenticated and the server decides what that is worth.
    pub async fn token(&self) -> Option<String> {
        let now = Utc::now();

        if let Some(cached) = self.cached.lock().unwrap().as_ref() {
            if cached.is_usable(now) {
                return Some(cached.access_token.clone());
            }
        }

        match self.exchange().await {
            Ok(response) => {
                let cached = CachedToken {
                    access_token: response.access_token.clone(),
                    expiration: now + Duration::seconds(response.expires_in),
                };
                *self.cached.lock().unwrap() = Some(cached);
                Some(response.access_token)
            }
            Err(err) => {
                tracing::warn!("Failed to acquire authentication token: {}", err);
                None
            }
        }
    }

    /// Attach a bearer credential to `request` when a token is obtainable;
    /// otherwise hand the request back untouched.
    pub async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token().await {
            Some(token) => request.bearer_auth(token),
            None => {
                tracing::warn!("Could not get authentication token. Request will be unauthorized.");
                request
            }
        }
    }

    async fn exchange(&self) -> Result<TokenResponse, ClientError> {
        let url = format!("{}/auth/token", self.base_url);
        let body = TokenRequest {
            api_key: self.api_key.clone(),
            client_id: self.client_id.clone(),
        };

        let response = self
            .transport
            .execute(|| self.transport.client().post(&url).json(&body).send())
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::UnexpectedStatus(response.status()));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ClientError::Payload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_usable_until_refresh_margin() {
        let now = Utc::now();
        let cached = CachedToken {
            access_token: "token".to_string(),
            expiration: now + Duration::minutes(60),
        };

        assert!(cached.is_usable(now));
        assert!(cached.is_usable(now + Duration::minutes(54)));
        assert!(!cached.is_usable(now + Duration::minutes(55)));
        assert!(!cached.is_usable(now + Duration::minutes(61)));
    }
}
