// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log Level
    ///
    /// Env: STORY_LOG_LEVEL
    /// Valid values: trace, debug, info, warn, error, http
    /// Default: info
    pub level: String,

    /// Output logs in JSON format
    ///
    /// Env: STORY_LOG_JSON
    /// Default: false
    pub json: bool,

    /// Strip ANSI color codes from logs
    ///
    /// Env: STORY_LOG_STRIP_ANSI
    /// Default: false
    pub strip_ansi: bool,

    /// Also write logs to a size-rotated file
    ///
    /// Env: STORY_LOG_WRITE
    /// Default: false
    pub write: bool,

    /// Directory for log files
    ///
    /// Env: STORY_LOG_WRITE_PATH
    /// Default: ./logs
    pub write_path: String,

    /// Maximum log file size in bytes before rotation
    ///
    /// Env: STORY_LOG_WRITE_MAX_FILE_SIZE
    /// Default: 5242880 (5 MiB)
    pub write_max_file_size: u64,

    /// Number of log files kept, including the current one
    ///
    /// Env: STORY_LOG_WRITE_MAX_FILES
    /// Default: 5
    pub write_max_files: usize,

    /// Loki push URL, e.g. http://127.0.0.1:3100
    ///
    /// Env: STORY_LOG_LOKI_URL
    /// Default: unset
    pub loki_url: Option<String>,
}

pub(crate) fn default_level() -> String {
    "info".to_string()
}

pub(crate) fn default_write_path() -> String {
    "./logs".to_string()
}

pub(crate) fn default_write_max_file_size() -> u64 {
    5 * 1024 * 1024
}

pub(crate) fn default_write_max_files() -> usize {
    5
}

impl LogConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "http"];

        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::ValidateError(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            )));
        }

        if self.write && self.write_max_file_size == 0 {
            return Err(ConfigError::ValidateError(
                "Log file size limit cannot be 0".to_string(),
            ));
        }

        if let Some(url) = &self.loki_url {
            url::Url::parse(url).map_err(|e| {
                ConfigError::ValidateError(format!("Invalid Loki URL '{}': {}", url, e))
            })?;
        }

        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            strip_ansi: false,
            write: false,
            write_path: default_write_path(),
            write_max_file_size: default_write_max_file_size(),
            write_max_files: default_write_max_files(),
            loki_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json);
        assert!(!config.strip_ansi);
        assert!(!config.write);
        assert_eq!(config.write_max_files, 5);
    }

    #[test]
    fn test_validate_valid_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "http"] {
            let config = LogConfig {
                level: level.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "Level {} should be valid", level);
        }
    }

    #[test]
    fn test_validate_invalid_levels() {
        let config = LogConfig {
            level: "invalid".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_loki_url() {
        let config = LogConfig {
            loki_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LogConfig {
            loki_url: Some("http://127.0.0.1:3100".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
