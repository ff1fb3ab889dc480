//! Weather forecast handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentClient;
use crate::repository::PgForecastStore;
use crate::services::WeatherService;
use crate::AppState;
use shared::models::ForecastResponse;

/// Forecast window endpoint handler
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    current_client: CurrentClient,
) -> AppResult<Json<Vec<ForecastResponse>>> {
    tracing::debug!(
        client_id = %current_client.0.client_id,
        client_type = %current_client.0.client_type,
        "forecast window requested"
    );

    let service = WeatherService::new(PgForecastStore::new(state.db.clone()));
    let forecasts = service.get_forecasts().await?;

    Ok(Json(
        forecasts.into_iter().map(ForecastResponse::from).collect(),
    ))
}
