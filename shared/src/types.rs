//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Kind of client a credential is registered to
///
/// Carried as a JWT claim and used for authorization policy; the variant
/// name is the claim value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClientType {
    WebApplication,
    InternalService,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::WebApplication => "WebApplication",
            ClientType::InternalService => "InternalService",
        }
    }
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /auth/token`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub client_id: String,
}

/// Successful response of `POST /auth/token`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_type_claim_values() {
        assert_eq!(
            serde_json::to_string(&ClientType::WebApplication).unwrap(),
            "\"WebApplication\""
        );
        assert_eq!(
            serde_json::to_string(&ClientType::InternalService).unwrap(),
            "\"InternalService\""
        );
    }

    #[test]
    fn test_token_request_tolerates_missing_fields() {
        let request: TokenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.api_key.is_empty());
        assert!(request.client_id.is_empty());
    }

    #[test]
    fn test_token_response_wire_format() {
        let response = TokenResponse {
            access_token: "abc".to_string(),
            expires_in: 3600,
            token_type: "Bearer".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["accessToken"], "abc");
        assert_eq!(json["expiresIn"], 3600);
        assert_eq!(json["tokenType"], "Bearer");
    }
}
