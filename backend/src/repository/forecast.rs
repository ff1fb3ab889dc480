//! Forecast store: one record per calendar day, keyed by date

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use thiserror::Error;

use shared::models::WeatherForecast;

/// Errors surfaced by a forecast store
///
/// Each class is distinct and rethrown to the service untransformed:
/// connectivity failures, constraint violations from a concurrent
/// conflicting write, and everything else as a generic persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connectivity failure: {0}")]
    Connectivity(#[source] sqlx::Error),

    #[error("conflicting write: {0}")]
    Conflict(#[source] sqlx::Error),

    #[error("persistence failure: {0}")]
    Persistence(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Connectivity(err)
            }
            // SQLSTATE class 23: integrity constraint violation
            sqlx::Error::Database(db) if db.code().is_some_and(|c| c.starts_with("23")) => {
                StoreError::Conflict(err)
            }
            _ => StoreError::Persistence(err),
        }
    }
}

/// Persistence seam for daily forecasts
///
/// `get` is read-only and creates no tracking state that could cause a
/// later accidental double-write. `save` inserts a missing record or
/// replaces every field of an existing one, and commits durably before
/// returning. Callers serialize access per date; the store itself does not
/// linearize concurrent saves for the same day.
#[async_trait]
pub trait ForecastStore: Send + Sync {
    async fn get(&self, day: NaiveDate) -> Result<Option<WeatherForecast>, StoreError>;

    async fn save(&self, forecast: &WeatherForecast) -> Result<(), StoreError>;
}

/// Postgres-backed forecast store
///
/// Connections are scoped per call: the pool hands one out for the query
/// and reclaims it on completion.
#[derive(Clone)]
pub struct PgForecastStore {
    db: PgPool,
}

impl PgForecastStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(sqlx::FromRow)]
struct ForecastRow {
    date: NaiveDate,
    temperature_c: i32,
    summary: Option<String>,
}

impl From<ForecastRow> for WeatherForecast {
    fn from(row: ForecastRow) -> Self {
        WeatherForecast::new(row.date, row.temperature_c, row.summary)
    }
}

#[async_trait]
impl ForecastStore for PgForecastStore {
    async fn get(&self, day: NaiveDate) -> Result<Option<WeatherForecast>, StoreError> {
        let row = sqlx::query_as::<_, ForecastRow>(
            "SELECT date, temperature_c, summary FROM forecasts WHERE date = $1",
        )
        .bind(day)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(WeatherForecast::from))
    }

    async fn save(&self, forecast: &WeatherForecast) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO forecasts (date, temperature_c, summary)
            VALUES ($1, $2, $3)
            ON CONFLICT (date)
            DO UPDATE SET temperature_c = EXCLUDED.temperature_c, summary = EXCLUDED.summary
            "#,
        )
        .bind(forecast.date)
        .bind(forecast.temperature_c)
        .bind(&forecast.summary)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl<S: ForecastStore + ?Sized> ForecastStore for std::sync::Arc<S> {
    async fn get(&self, day: NaiveDate) -> Result<Option<WeatherForecast>, StoreError> {
        (**self).get(day).await
    }

    async fn save(&self, forecast: &WeatherForecast) -> Result<(), StoreError> {
        (**self).save(forecast).await
    }
}
