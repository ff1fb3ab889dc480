//! Route definitions for the Skycast API service

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::auth_middleware;
use crate::{handlers, AppState};

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Forecast routes (bearer-protected)
        .merge(weather_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(handlers::issue_token))
}

/// Weather routes (protected)
fn weather_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/weatherforecast", get(handlers::get_weather_forecast))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Root endpoint
async fn root() -> &'static str {
    "Skycast Weather API v1.0"
}
