//! Authentication handlers

use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::services::AuthService;
use crate::AppState;
use shared::types::{TokenRequest, TokenResponse};

/// Token issuance endpoint handler
///
/// Missing fields are a validation failure (400); an unknown key or a
/// key/client mismatch is an authentication failure (401).
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    if body.api_key.is_empty() {
        return Err(AppError::Validation {
            field: "apiKey".to_string(),
            message: "API key is required".to_string(),
        });
    }

    if body.client_id.is_empty() {
        return Err(AppError::Validation {
            field: "clientId".to_string(),
            message: "Client ID is required".to_string(),
        });
    }

    let auth_service = AuthService::new(&state.config);
    let issued = auth_service.exchange(&body.api_key, &body.client_id)?;

    Ok(Json(TokenResponse {
        access_token: issued.access_token,
        expires_in: issued.expires_in,
        token_type: "Bearer".to_string(),
    }))
}
