//! Network access for the catalog: a pluggable [CatalogSource] and the HTTPS
//! implementation with bounded retry on transient statuses.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::AdvisorError;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://ddragon.leagueoflegends.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Anything that can return the raw body of a catalog path such as
/// `/cdn/15.1.1/data/en_US/item.json`.
pub trait CatalogSource {
    fn fetch_text(&self, path: &str) -> Result<String, AdvisorError>;
}

/// One failed attempt. `transient` failures are retried by [RetryPolicy::run].
#[derive(Debug, Clone)]
pub struct AttemptFailure {
    pub transient: bool,
    pub message: String,
}

impl AttemptFailure {
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let transient = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
        let snippet: String = body.chars().take(200).collect();
        Self {
            transient,
            message: format!("HTTP {status}: {snippet}"),
        }
    }

    pub fn from_transport(err: &reqwest::Error) -> Self {
        Self {
            transient: err.is_timeout() || err.is_connect(),
            message: err.to_string(),
        }
    }
}

/// Exponential backoff: `base_delay_ms * 2^(attempt-1)`, capped at `max_delay_ms`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 4_000,
        }
    }
}

impl RetryPolicy {
    pub fn no_delay(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponential = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        Duration::from_millis(exponential.min(self.max_delay_ms))
    }

    pub fn run<T, F>(&self, resource: &str, mut operation: F) -> Result<T, AdvisorError>
    where
        F: FnMut() -> Result<T, AttemptFailure>,
    {
        let attempts = self.max_attempts.max(1);
        let mut last = None;
        for attempt in 1..=attempts {
            match operation() {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(resource, attempt, "request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(failure) if failure.transient && attempt < attempts => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        resource,
                        attempt,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure.message,
                        "transient failure, retrying"
                    );
                    thread::sleep(delay);
                    last = Some(failure);
                }
                Err(failure) => {
                    last = Some(failure);
                    break;
                }
            }
        }
        let message = last
            .map(|f| f.message)
            .unwrap_or_else(|| "no attempt made".to_string());
        tracing::error!(resource, error = %message, "request failed");
        Err(AdvisorError::upstream(resource, message))
    }
}

/// Build a blocking client with the shared timeout and TLS policy.
pub fn build_http_client(timeout: Duration, insecure_tls: bool) -> Result<Client, AdvisorError> {
    Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(insecure_tls)
        .build()
        .map_err(|e| AdvisorError::upstream("http client", e.to_string()))
}

pub struct HttpCatalogSource {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpCatalogSource {
    pub fn new(base_url: &str, insecure_tls: bool) -> Result<Self, AdvisorError> {
        if insecure_tls {
            tracing::warn!("TLS certificate verification disabled for catalog requests");
        }
        Ok(Self {
            client: build_http_client(Duration::from_secs(REQUEST_TIMEOUT_SECS), insecure_tls)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn get_once(&self, url: &str) -> Result<String, AttemptFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AttemptFailure::from_transport(&e))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AttemptFailure::from_transport(&e))?;
        if !status.is_success() {
            return Err(AttemptFailure::from_status(status, &body));
        }
        Ok(body)
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch_text(&self, path: &str) -> Result<String, AdvisorError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "fetching catalog resource");
        self.retry.run(path, || self.get_once(&url))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use reqwest::StatusCode;

    use super::{AttemptFailure, RetryPolicy};
    use crate::error::ErrorCode;

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay_ms: 100,
            max_delay_ms: 300,
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(300));
    }

    #[test]
    fn transient_failures_are_retried_until_success() {
        let calls = Cell::new(0);
        let result = RetryPolicy::no_delay(3).run("item.json", || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(AttemptFailure::from_status(StatusCode::SERVICE_UNAVAILABLE, ""))
            } else {
                Ok("body")
            }
        });
        assert_eq!(result.unwrap(), "body");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn attempts_are_bounded_for_persistent_429() {
        let calls = Cell::new(0);
        let result: Result<(), _> = RetryPolicy::no_delay(3).run("item.json", || {
            calls.set(calls.get() + 1);
            Err(AttemptFailure::from_status(StatusCode::TOO_MANY_REQUESTS, "slow down"))
        });
        let err = result.unwrap_err();
        assert_eq!(calls.get(), 3);
        assert_eq!(err.code(), ErrorCode::UpstreamFetch);
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn client_errors_are_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), _> = RetryPolicy::no_delay(3).run("item.json", || {
            calls.set(calls.get() + 1);
            Err(AttemptFailure::from_status(StatusCode::NOT_FOUND, ""))
        });
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
