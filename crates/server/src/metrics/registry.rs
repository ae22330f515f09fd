// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    pub static ref REGISTRY: Mutex<Option<Registry>> = Mutex::new(None);

    // Created without registering to the default registry
    pub static ref HTTP_REQUESTS: Counter = Counter::new(
        "http_requests",
        "Total number of HTTP requests"
    )
    .expect("Failed to create http_requests counter");

    pub static ref HTTP_REQUEST_SUCCESS: Counter = Counter::new(
        "http_request_success",
        "Number of successful HTTP requests"
    )
    .expect("Failed to create http_request_success counter");

    pub static ref HTTP_REQUEST_ERROR: Counter = Counter::new(
        "http_request_error",
        "Number of HTTP request errors"
    )
    .expect("Failed to create http_request_error counter");

    pub static ref REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "request_duration_seconds",
            "Duration of HTTP requests in seconds"
        ).buckets(vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0]),
        &["method", "route", "status_code"]
    )
    .expect("Failed to create request_duration_seconds histogram");

    pub static ref RESPONSE_SIZE_BYTES: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "response_size_bytes",
            "Size of HTTP responses in bytes"
        ).buckets(vec![100.0, 500.0, 1000.0, 5000.0, 10000.0, 50000.0, 100000.0, 500000.0]),
        &["method", "route", "status_code"]
    )
    .expect("Failed to create response_size_bytes histogram");

    pub static ref POLL_CYCLES: CounterVec = CounterVec::new(
        Opts::new("poll_cycles", "Story fetch cycles by outcome"),
        &["outcome"]
    )
    .expect("Failed to create poll_cycles counter");

    pub static ref CHAIN_CALLS: CounterVec = CounterVec::new(
        Opts::new("chain_calls", "Read-only contract calls by function"),
        &["function"]
    )
    .expect("Failed to create chain_calls counter");

    pub static ref CHAIN_RETRIES: Counter = Counter::new(
        "chain_retries",
        "Retried contract calls"
    )
    .expect("Failed to create chain_retries counter");

    pub static ref WORD_SUBMISSIONS: CounterVec = CounterVec::new(
        Opts::new("word_submissions", "Word submissions by outcome"),
        &["outcome"]
    )
    .expect("Failed to create word_submissions counter");

    pub static ref STORY_ENTRIES: IntGauge = IntGauge::new(
        "story_entries",
        "Entries in the current story snapshot"
    )
    .expect("Failed to create story_entries gauge");
}

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("Metrics not initialized")]
    NotInitialized,

    #[error("Metrics output is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Metrics registry lock poisoned")]
    Poisoned,
}

/// Register all metrics with a registry using `prefix`. Later calls are no-ops.
pub fn init(prefix: &str) -> Result<(), MetricsError> {
    let mut guard = REGISTRY.lock().map_err(|_| MetricsError::Poisoned)?;
    if guard.is_some() {
        return Ok(());
    }

    let registry = Registry::new_custom(Some(prefix.to_string()), None)?;
    registry.register(Box::new(HTTP_REQUESTS.clone()))?;
    registry.register(Box::new(HTTP_REQUEST_SUCCESS.clone()))?;
    registry.register(Box::new(HTTP_REQUEST_ERROR.clone()))?;
    registry.register(Box::new(REQUEST_DURATION_SECONDS.clone()))?;
    registry.register(Box::new(RESPONSE_SIZE_BYTES.clone()))?;
    registry.register(Box::new(POLL_CYCLES.clone()))?;
    registry.register(Box::new(CHAIN_CALLS.clone()))?;
    registry.register(Box::new(CHAIN_RETRIES.clone()))?;
    registry.register(Box::new(WORD_SUBMISSIONS.clone()))?;
    registry.register(Box::new(STORY_ENTRIES.clone()))?;

    *guard = Some(registry);
    Ok(())
}

/// Gather all metrics as Prometheus text format
pub fn gather_metrics() -> Result<String, MetricsError> {
    let guard = REGISTRY.lock().map_err(|_| MetricsError::Poisoned)?;
    let registry = guard.as_ref().ok_or(MetricsError::NotInitialized)?;
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent_and_prefixed() {
        init("diary_test").unwrap();
        init("ignored").unwrap();

        POLL_CYCLES.with_label_values(&["ok"]).inc();
        let text = gather_metrics().unwrap();
        assert!(text.contains("diary_test_poll_cycles"));
        assert!(!text.contains("ignored_"));
    }
}
