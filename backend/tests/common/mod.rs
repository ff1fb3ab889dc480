//! Shared fixtures for backend integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use shared::models::WeatherForecast;
use skycast_backend::config::{Config, DatabaseConfig, JwtConfig, ServerConfig};
use skycast_backend::repository::{ForecastStore, StoreError};

/// In-memory forecast store instrumented with call counters
#[derive(Default)]
pub struct MemoryForecastStore {
    records: Mutex<BTreeMap<NaiveDate, WeatherForecast>>,
    gets: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly, bypassing the trait
    pub fn seed(&self, forecast: WeatherForecast) {
        self.records
            .lock()
            .unwrap()
            .insert(forecast.date, forecast);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn record_for(&self, day: NaiveDate) -> Option<WeatherForecast> {
        self.records.lock().unwrap().get(&day).cloned()
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastStore for MemoryForecastStore {
    async fn get(&self, day: NaiveDate) -> Result<Option<WeatherForecast>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().get(&day).cloned())
    }

    async fn save(&self, forecast: &WeatherForecast) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .insert(forecast.date, forecast.clone());
        Ok(())
    }
}

/// Store whose operations always fail with a connectivity error
pub struct FailingForecastStore;

#[async_trait]
impl ForecastStore for FailingForecastStore {
    async fn get(&self, _day: NaiveDate) -> Result<Option<WeatherForecast>, StoreError> {
        Err(StoreError::from(sqlx::Error::PoolClosed))
    }

    async fn save(&self, _forecast: &WeatherForecast) -> Result<(), StoreError> {
        Err(StoreError::from(sqlx::Error::PoolClosed))
    }
}

/// Configuration for tests: no files, no environment, fixed signing key
pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        database: DatabaseConfig {
            // Unroutable on purpose: nothing in these tests may reach a database
            url: "postgres://postgres@127.0.0.1:1/forecasts".to_string(),
            max_connections: 1,
            min_connections: 0,
        },
        jwt: JwtConfig {
            key: "test-signing-key-not-for-production".to_string(),
            issuer: "skycast-api".to_string(),
            audience: "skycast-clients".to_string(),
            expiry_minutes: 60,
        },
    }
}
