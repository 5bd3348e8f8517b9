//! Bounded retry with increasing backoff
//!
//! Wraps a single fallible fetch/extract operation with a fixed number of
//! attempts and a capped, linearly growing delay between them. This is purely
//! about transient-failure tolerance, not throughput; pacing elsewhere
//! already randomizes request timing, so no jitter is applied here.

use crate::config::CrawlConfig;
use crate::{Result, ScrapeError};
use std::cmp;
use std::future::Future;
use std::time::Duration;

pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    delay_cap: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, delay_cap: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            delay_cap,
        }
    }

    pub fn from_config(config: &CrawlConfig) -> Self {
        Self::new(
            config.retry_attempts,
            Duration::from_millis(config.retry_base_delay_ms),
            Duration::from_millis(config.retry_delay_cap_ms),
        )
    }

    /// Runs `operation` up to `max_attempts` times.
    ///
    /// After a failed attempt `n` the policy sleeps
    /// `min(base_delay * n, delay_cap)` before the next one. When every
    /// attempt has failed, the final error is returned tagged with `context`
    /// so logs and the error log can tie it back to its work key.
    pub async fn execute<T, F, Fut>(&self, context: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1u32;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts => {
                    let delay = cmp::min(self.base_delay * attempt, self.delay_cap);
                    tracing::warn!(
                        "{}: attempt {}/{} failed ({}), retrying in {:?}",
                        context,
                        attempt,
                        self.max_attempts,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(ScrapeError::RetriesExhausted {
                        context: context.to_string(),
                        source: Box::new(err),
                    })
                }
            }
        }
    }
}
