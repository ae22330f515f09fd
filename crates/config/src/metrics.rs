// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(
        "Invalid Prometheus prefix '{0}': must start with [a-zA-Z_:] and contain only [a-zA-Z0-9_:]"
    )]
    InvalidPrometheusPrefix(String),
}

/// Configuration for Prometheus metrics
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Expose `/metrics`
    ///
    /// Env: STORY_METRICS_ENABLED
    /// Default: false
    pub enabled: bool,

    /// Prometheus metric name prefix
    ///
    /// Env: STORY_METRICS_PROMETHEUS_PREFIX
    /// Default: diary_api
    pub prometheus_prefix: String,
}

pub(crate) fn default_prometheus_prefix() -> String {
    "diary_api".to_string()
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            prometheus_prefix: default_prometheus_prefix(),
        }
    }
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<(), MetricsError> {
        // Must match [a-zA-Z_:][a-zA-Z0-9_:]*
        let mut chars = self.prometheus_prefix.chars();
        if let Some(first) = chars.next() {
            if !first.is_ascii_alphabetic() && first != '_' && first != ':' {
                return Err(MetricsError::InvalidPrometheusPrefix(
                    self.prometheus_prefix.clone(),
                ));
            }

            if chars.any(|ch| !ch.is_ascii_alphanumeric() && ch != '_' && ch != ':') {
                return Err(MetricsError::InvalidPrometheusPrefix(
                    self.prometheus_prefix.clone(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics_config() {
        let config = MetricsConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.prometheus_prefix, "diary_api");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_prefix() {
        for prefix in ["1diary", "diary-api", "diary api"] {
            let config = MetricsConfig {
                prometheus_prefix: prefix.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{} should be rejected", prefix);
        }
    }

    #[test]
    fn test_empty_prefix_is_allowed() {
        let config = MetricsConfig {
            prometheus_prefix: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
