//! Authentication middleware
//!
//! Validates bearer tokens minted by the token issuer and exposes the
//! calling client to protected handlers.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ErrorDetail, ErrorResponse};
use crate::services::AuthService;
use crate::AppState;
use shared::types::ClientType;

/// Authenticated client identity extracted from a bearer token
#[derive(Clone, Debug)]
pub struct AuthClient {
    pub client_id: String,
    pub client_type: ClientType,
}

/// Authentication middleware that validates bearer tokens
///
/// The signing key, issuer, and audience come from application state; the
/// middleware never reaches into ambient environment variables.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    let auth_service = AuthService::new(&state.config);
    let claims = match auth_service.validate_token(token) {
        Ok(claims) => claims,
        Err(_) => {
            return unauthorized_response("Invalid token");
        }
    };

    // Expose the caller to handlers via request extensions
    request.extensions_mut().insert(AuthClient {
        client_id: claims.sub,
        client_type: claims.client_type,
    });

    next.run(request).await
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
            field: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for the authenticated client
/// Use this in handlers to get the current caller
#[derive(Clone, Debug)]
pub struct CurrentClient(pub AuthClient);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentClient
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthClient>()
            .cloned()
            .map(CurrentClient)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message: "Authentication required".to_string(),
                        field: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}
