//! Exponential backoff for forecast and geocoding requests.
//!
//! Timeouts, dropped connections, 5xx, 408 and 429 are retried. Any other
//! outcome is handed back to the caller on the first attempt.

use std::future::Future;
use std::time::Duration;

use reqwest::{Response, StatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Extra attempts after the first request
    pub retries: u32,
    /// Pause before the first retry, doubled for each one after
    pub base: Duration,
    pub ceiling: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            retries: 2,
            base: Duration::from_millis(200),
            ceiling: Duration::from_secs(3),
        }
    }
}

impl Backoff {
    pub fn with_retries(retries: u32) -> Self {
        Self {
            retries,
            ..Self::default()
        }
    }

    /// Pause after failed attempt number `attempt` (zero-based).
    pub fn pause(&self, attempt: u32) -> Duration {
        let pause = self
            .base
            .checked_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX))
            .unwrap_or(self.ceiling);
        pause.min(self.ceiling)
    }
}

pub fn retryable_status(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
}

pub fn retryable_error(error: &reqwest::Error) -> bool {
    if error.is_timeout() || error.is_connect() {
        return true;
    }
    error.status().is_some_and(retryable_status)
}

/// Send the request built by `send`, retrying transient failures.
///
/// When retries run out on a retryable status the last response is
/// returned as-is so the caller can report the status code.
pub async fn send_with_backoff<F, Fut>(
    backoff: &Backoff,
    send: F,
) -> Result<Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    let mut attempt = 0;

    loop {
        let exhausted = attempt == backoff.retries;

        match send().await {
            Ok(response) if exhausted || !retryable_status(response.status()) => {
                if attempt > 0 {
                    tracing::info!("Got {} after {} retries", response.status(), attempt);
                }
                return Ok(response);
            }
            Ok(response) => {
                tracing::warn!(
                    "Got {}, retry {}/{}",
                    response.status(),
                    attempt + 1,
                    backoff.retries
                );
            }
            Err(e) if exhausted || !retryable_error(&e) => {
                tracing::debug!("Request failed for good: {}", e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Request failed ({}), retry {}/{}", e, attempt + 1, backoff.retries);
            }
        }

        tokio::time::sleep(backoff.pause(attempt)).await;
        // Not exhausted, so `attempt < retries` and this cannot overflow.
        attempt += 1;
    }
}
