//! Forecast retrieval and generation
//!
//! Get-or-create semantics over a 5-day window starting tomorrow.

use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

use crate::error::AppResult;
use crate::repository::ForecastStore;
use shared::models::{WeatherForecast, SUMMARIES};

/// Number of consecutive days in the forecast window
pub const FORECAST_WINDOW_DAYS: i64 = 5;

/// Lower temperature bound, inclusive
pub const TEMPERATURE_MIN_C: i32 = -20;

/// Upper temperature bound, exclusive
pub const TEMPERATURE_MAX_C: i32 = 55;

/// Weather service orchestrating forecast lookups against a store
#[derive(Clone)]
pub struct WeatherService<S> {
    store: S,
}

impl<S: ForecastStore> WeatherService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Return forecasts for the 5 consecutive days starting tomorrow,
    /// ordered by day offset ascending.
    ///
    /// Days are visited in sequence: the storage session must never see
    /// concurrent writers from the same request. A stored record is
    /// returned verbatim; a missing day is generated, persisted, and the
    /// generated value included. Store errors propagate unmodified and
    /// nothing is retried here.
    pub async fn get_forecasts(&self) -> AppResult<Vec<WeatherForecast>> {
        let today = Utc::now().date_naive();
        let mut forecasts = Vec::with_capacity(FORECAST_WINDOW_DAYS as usize);

        for offset in 1..=FORECAST_WINDOW_DAYS {
            let day = today + Duration::days(offset);

            let forecast = match self.store.get(day).await? {
                Some(existing) => existing,
                None => {
                    let generated = generate_forecast(day, &mut rand::thread_rng());
                    self.store.save(&generated).await?;
                    generated
                }
            };

            forecasts.push(forecast);
        }

        Ok(forecasts)
    }
}

/// Generate a pseudo-random forecast for `day`.
///
/// Pure in `day` and the random source, no side effects. Temperature is
/// uniform in [-20, 55) and the summary a uniform pick from the fixed
/// vocabulary. The caller is responsible for invoking this only when no
/// record exists for the date.
pub fn generate_forecast(day: NaiveDate, rng: &mut impl Rng) -> WeatherForecast {
    let temperature_c = rng.gen_range(TEMPERATURE_MIN_C..TEMPERATURE_MAX_C);
    let summary = SUMMARIES[rng.gen_range(0..SUMMARIES.len())];

    WeatherForecast::new(day, temperature_c, Some(summary.to_string()))
}
