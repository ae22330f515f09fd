// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;
use std::str::FromStr;
use std::time::Duration;

/// How the story is read from the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalMode {
    /// `get-word-count`, then one `get-word` call per id.
    Paged,
    /// A single `get-story` call returning the whole list.
    Bulk,
}

impl FromStr for RetrievalMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paged" => Ok(Self::Paged),
            "bulk" => Ok(Self::Bulk),
            other => Err(ConfigError::ValidateError(format!(
                "Invalid poll mode '{}'. Must be one of: paged, bulk",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Env: STORY_POLL_INTERVAL_MS
    /// Default: 30000
    pub interval_ms: u64,

    /// Delay before each per-id call in paged mode
    ///
    /// Env: STORY_POLL_API_DELAY_MS
    /// Default: 1000
    pub api_delay_ms: u64,

    /// Env: STORY_POLL_MAX_RETRIES
    /// Default: 3
    pub max_retries: u32,

    /// First exponential backoff delay
    ///
    /// Env: STORY_POLL_INITIAL_RETRY_DELAY_MS
    /// Default: 1000
    pub initial_retry_delay_ms: u64,

    /// Fixed wait after a per-minute rate limit response
    ///
    /// Env: STORY_POLL_RATE_LIMIT_WAIT_MS
    /// Default: 30000
    pub rate_limit_wait_ms: u64,

    /// Env: STORY_POLL_REQUEST_TIMEOUT_MS
    /// Default: 10000
    pub request_timeout_ms: u64,

    /// Env: STORY_POLL_MODE
    /// Valid values: paged, bulk
    /// Default: paged
    pub mode: RetrievalMode,
}

pub(crate) fn default_interval_ms() -> u64 {
    30_000
}

pub(crate) fn default_api_delay_ms() -> u64 {
    1_000
}

pub(crate) fn default_max_retries() -> u32 {
    3
}

pub(crate) fn default_initial_retry_delay_ms() -> u64 {
    1_000
}

pub(crate) fn default_rate_limit_wait_ms() -> u64 {
    30_000
}

pub(crate) fn default_request_timeout_ms() -> u64 {
    10_000
}

pub(crate) fn default_mode() -> String {
    "paged".to_string()
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn api_delay(&self) -> Duration {
        Duration::from_millis(self.api_delay_ms)
    }

    pub fn initial_retry_delay(&self) -> Duration {
        Duration::from_millis(self.initial_retry_delay_ms)
    }

    pub fn rate_limit_wait(&self) -> Duration {
        Duration::from_millis(self.rate_limit_wait_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ValidateError(
                "Poll interval cannot be 0".to_string(),
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ValidateError(
                "Request timeout cannot be 0".to_string(),
            ));
        }

        if self.max_retries > 10 {
            return Err(ConfigError::ValidateError(format!(
                "Max retries must be at most 10, got {}",
                self.max_retries
            )));
        }

        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            api_delay_ms: default_api_delay_ms(),
            max_retries: default_max_retries(),
            initial_retry_delay_ms: default_initial_retry_delay_ms(),
            rate_limit_wait_ms: default_rate_limit_wait_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            mode: RetrievalMode::Paged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_config() {
        let config = PollConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(30));
        assert_eq!(config.api_delay(), Duration::from_secs(1));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.mode, RetrievalMode::Paged);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_interval() {
        let config = PollConfig {
            interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_retry_cap() {
        let config = PollConfig {
            max_retries: 11,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("bulk".parse::<RetrievalMode>().unwrap(), RetrievalMode::Bulk);
        assert_eq!("Paged".parse::<RetrievalMode>().unwrap(), RetrievalMode::Paged);
        assert!("stream".parse::<RetrievalMode>().is_err());
    }
}
