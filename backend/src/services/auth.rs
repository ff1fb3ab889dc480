//! Token issuance for registered API clients
//!
//! Exchanges a shared-secret API key bound to a client identifier for a
//! signed, time-limited access token carrying a client-type claim.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use shared::types::ClientType;

/// Credential registry mapping an API key to its registered client
///
/// Injected into the service rather than read ambiently. In a real system
/// this is an external credential store; the sample carries two fixed
/// entries.
#[derive(Debug, Clone)]
pub struct ApiKeyRegistry {
    keys: HashMap<String, (String, ClientType)>,
}

impl ApiKeyRegistry {
    pub fn new(keys: HashMap<String, (String, ClientType)>) -> Self {
        Self { keys }
    }

    pub fn lookup(&self, api_key: &str) -> Option<&(String, ClientType)> {
        self.keys.get(api_key)
    }
}

impl Default for ApiKeyRegistry {
    fn default() -> Self {
        let mut keys = HashMap::new();
        // API key for the web application
        keys.insert(
            "web-app-api-key-1234567890".to_string(),
            ("web-client".to_string(), ClientType::WebApplication),
        );
        // API key for internal services
        keys.insert(
            "internal-service-key-0987654321".to_string(),
            ("internal-service".to_string(), ClientType::InternalService),
        );
        Self { keys }
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub jti: String,
    pub client_type: ClientType,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly minted access token
#[derive(Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    registry: ApiKeyRegistry,
    jwt_key: String,
    issuer: String,
    audience: String,
    expiry_minutes: i64,
}

impl AuthService {
    /// Create a new AuthService with the default credential registry
    pub fn new(config: &Config) -> Self {
        Self::with_registry(config, ApiKeyRegistry::default())
    }

    /// Create a new AuthService with an explicit credential registry
    pub fn with_registry(config: &Config, registry: ApiKeyRegistry) -> Self {
        Self {
            registry,
            jwt_key: config.jwt.key.clone(),
            issuer: config.jwt.issuer.clone(),
            audience: config.jwt.audience.clone(),
            expiry_minutes: config.jwt.expiry_minutes,
        }
    }

    /// Exchange an API key and client ID for a signed access token.
    ///
    /// Rejection signals invalid credentials, not a fault: an empty key, an
    /// unknown key, and a key registered to a different client ID all map
    /// to the same rejection.
    pub fn exchange(&self, api_key: &str, client_id: &str) -> AppResult<IssuedToken> {
        if api_key.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        let (registered_client, client_type) = self
            .registry
            .lookup(api_key)
            .ok_or(AppError::InvalidCredentials)?;

        if registered_client != client_id {
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.mint(client_id, *client_type)?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.expiry_minutes * 60,
        })
    }

    /// Validate a bearer token and return its claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_key.as_bytes()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    /// Sign a token for a validated client.
    ///
    /// Every token gets a fresh `jti`; subject, client type, issuer, and
    /// audience are stable across calls with the same inputs.
    fn mint(&self, client_id: &str, client_type: ClientType) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::minutes(self.expiry_minutes);

        let claims = Claims {
            sub: client_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            client_type,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_key.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }
}
