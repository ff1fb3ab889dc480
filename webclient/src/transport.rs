//! Resilient HTTP transport for the web client
//!
//! All resilience lives here as configuration handed to the transport:
//! bounded retries with exponential backoff for transient failures, and a
//! circuit breaker that opens after a run of failures and half-closes after
//! a cool-down window. The facades calling through this module perform no
//! retries of their own.
//!
//! Retryable: timeouts, connection errors, 5xx, 408, 429.
//! Never retried: other 4xx (bad requests, authentication failures).

use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::{Response, StatusCode};

use crate::error::ClientError;

/// Timeouts applied to the underlying HTTP client
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Bounded retry with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial try
    pub max_retries: u32,
    /// Initial delay between retries (doubles each attempt)
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(5000),
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (zero-based)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let delay_ms = (self.initial_delay.as_millis() as u64).saturating_mul(factor);
        Duration::from_millis(delay_ms.min(self.max_delay.as_millis() as u64))
    }
}

/// Circuit breaker thresholds
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive transport failures before the circuit opens
    pub failure_threshold: u32,
    /// Cool-down before the circuit half-closes and lets a probe through
    pub reset_after: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            reset_after: Duration::from_secs(30),
        }
    }
}

fn is_retryable_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
}

#[derive(Debug)]
struct CircuitState {
    consecutive_failures: u32,
    open_until: Option<Instant>,
}

/// HTTP transport with retry and circuit-breaker policies applied
pub struct Transport {
    client: reqwest::Client,
    retry: RetryConfig,
    breaker: CircuitBreakerConfig,
    state: Mutex<CircuitState>,
}

impl Transport {
    pub fn new(
        config: &TransportConfig,
        retry: RetryConfig,
        breaker: CircuitBreakerConfig,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .expect("failed to build reqwest client");

        Self {
            client,
            retry,
            breaker,
            state: Mutex::new(CircuitState {
                consecutive_failures: 0,
                open_until: None,
            }),
        }
    }

    /// The underlying HTTP client, for building requests
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Run `operation` through the breaker and retry policy.
    ///
    /// The closure must build a fresh request per call so each retry sends
    /// a new one. Non-retryable statuses are handed back to the caller
    /// as-is; transport errors after exhausted retries surface as
    /// `ClientError::Transport`.
    pub async fn execute<F, Fut>(&self, operation: F) -> Result<Response, ClientError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Response, reqwest::Error>>,
    {
        if self.circuit_is_open() {
            return Err(ClientError::CircuitOpen);
        }

        let mut attempt = 0;
        loop {
            if attempt > 0 {
                tokio::time::sleep(self.retry.delay_for_attempt(attempt - 1)).await;
            }

            match operation().await {
                Ok(response) => {
                    let status = response.status();
                    if is_retryable_status(status) && attempt < self.retry.max_retries {
                        tracing::debug!(%status, attempt, "retryable status, backing off");
                        attempt += 1;
                        continue;
                    }

                    if is_retryable_status(status) {
                        // Retries exhausted on a transport-class failure
                        self.record_failure();
                    } else {
                        // The server answered; the run of failures is over
                        self.record_success();
                    }
                    return Ok(response);
                }
                Err(err) => {
                    if is_retryable_error(&err) && attempt < self.retry.max_retries {
                        tracing::debug!(error = %err, attempt, "transport error, backing off");
                        attempt += 1;
                        continue;
                    }

                    self.record_failure();
                    return Err(ClientError::Transport(err));
                }
            }
        }
    }

    fn circuit_is_open(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        match state.open_until {
            Some(until) if Instant::now() < until => true,
            Some(_) => {
                // Cool-down elapsed: half-close and let the next call probe
                state.open_until = None;
                state.consecutive_failures = 0;
                false
            }
            None => false,
        }
    }

    fn record_success(&self) {
        let mut state = self.state.lock().unwrap();
        state.consecutive_failures = 0;
        state.open_until = None;
    }

    fn record_failure(&self) {
        let mut state = self.state.lock().unwrap();
        state.consecutive_failures += 1;
        if state.consecutive_failures >= self.breaker.failure_threshold {
            state.open_until = Some(Instant::now() + self.breaker.reset_after);
            tracing::warn!(
                failures = state.consecutive_failures,
                "circuit breaker opened"
            );
        }
    }
}
