//! Weather forecast entity and wire representation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed vocabulary of forecast summaries
pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// A single day's weather forecast
///
/// `date` is the identity: the store keeps at most one record per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

impl WeatherForecast {
    pub fn new(date: NaiveDate, temperature_c: i32, summary: Option<String>) -> Self {
        Self {
            date,
            temperature_c,
            summary,
        }
    }

    /// Fahrenheit equivalent, computed on demand and never stored.
    ///
    /// Integer truncation matches the wire contract: `32 + (c / 0.5556)`.
    pub fn temperature_f(&self) -> i32 {
        32 + (self.temperature_c as f64 / 0.5556) as i32
    }
}

/// Forecast as the API emits it: camelCase, with the derived Fahrenheit field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub summary: Option<String>,
    pub temperature_f: i32,
}

impl From<WeatherForecast> for ForecastResponse {
    fn from(forecast: WeatherForecast) -> Self {
        let temperature_f = forecast.temperature_f();
        Self {
            date: forecast.date,
            temperature_c: forecast.temperature_c,
            summary: forecast.summary,
            temperature_f,
        }
    }
}

impl From<ForecastResponse> for WeatherForecast {
    fn from(response: ForecastResponse) -> Self {
        Self {
            date: response.date,
            temperature_c: response.temperature_c,
            summary: response.summary,
        }
    }
}
