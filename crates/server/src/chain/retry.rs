// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::future::Future;
use std::time::Duration;

use config::PollConfig;
use tokio::time::sleep;
use tracing::warn;

use super::error::ChainError;
use crate::metrics::registry::CHAIN_RETRIES;

/// Retry schedule for contract reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub rate_limit_wait: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &PollConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: config.initial_retry_delay(),
            rate_limit_wait: config.rate_limit_wait(),
        }
    }

    /// Delay before retry number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32, err: &ChainError) -> Duration {
        if err.is_per_minute_limit() {
            return self.rate_limit_wait;
        }
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Run `call`, retrying transient failures. Exhaustion returns the last error.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, ChainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ChainError>>,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt, &err);
                    warn!(
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying after backoff"
                    );
                    CHAIN_RETRIES.inc();
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&PollConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            rate_limit_wait: Duration::from_millis(30_000),
        }
    }

    #[test]
    fn test_delay_schedule() {
        let network = ChainError::Network("reset".to_string());
        let p = policy();
        assert_eq!(p.delay_for(0, &network), Duration::from_millis(1000));
        assert_eq!(p.delay_for(1, &network), Duration::from_millis(2000));
        assert_eq!(p.delay_for(2, &network), Duration::from_millis(4000));

        let per_minute = ChainError::from_status(429, "Per-minute rate limit".to_string());
        assert_eq!(p.delay_for(0, &per_minute), Duration::from_millis(30_000));
        assert_eq!(p.delay_for(2, &per_minute), Duration::from_millis(30_000));
    }

    #[test]
    fn test_default_matches_poll_defaults() {
        assert_eq!(policy(), RetryPolicy::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let counter = calls.clone();
        let result = policy()
            .run("test", || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(ChainError::Network("reset".to_string()))
                    } else {
                        Ok(7)
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let counter = calls.clone();
        let result: Result<(), _> = policy()
            .run("test", || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    Err(ChainError::HttpStatus {
                        status: 500,
                        body: format!("attempt {}", n),
                    })
                }
            })
            .await;

        assert_eq!(
            result,
            Err(ChainError::HttpStatus {
                status: 500,
                body: "attempt 3".to_string()
            })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(start.elapsed(), Duration::from_millis(1000 + 2000 + 4000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_minute_limit_waits_fixed_interval() {
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let counter = calls.clone();
        let result = policy()
            .run("test", || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(ChainError::from_status(
                            429,
                            "Per-minute rate limit exceeded".to_string(),
                        ))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(start.elapsed(), Duration::from_millis(30_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_transient_fails_immediately() {
        let calls = Arc::new(AtomicU32::new(0));

        let counter = calls.clone();
        let result: Result<(), _> = policy()
            .run("test", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(ChainError::CallFailed("no such function".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(ChainError::CallFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
