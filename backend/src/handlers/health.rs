//! Health check handlers

use std::time::Instant;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub checks: Vec<HealthCheck>,
    pub total_duration: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub description: String,
    pub duration: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let started = Instant::now();

    // Check database connectivity
    let db_started = Instant::now();
    let (db_status, db_description) = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => ("Healthy".to_string(), "database reachable".to_string()),
        Err(e) => (
            "Unhealthy".to_string(),
            format!("database unreachable: {}", e),
        ),
    };

    let checks = vec![HealthCheck {
        name: "database".to_string(),
        status: db_status,
        description: db_description,
        duration: format!("{:?}", db_started.elapsed()),
    }];

    let status = if checks.iter().all(|c| c.status == "Healthy") {
        "Healthy"
    } else {
        "Unhealthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        checks,
        total_duration: format!("{:?}", started.elapsed()),
    })
}
