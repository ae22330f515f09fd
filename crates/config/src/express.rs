// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;
use std::net::IpAddr;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ExpressConfig {
    /// Address to bind the HTTP server to
    ///
    /// Env: STORY_EXPRESS_BIND_HOST
    /// Default: 127.0.0.1
    pub bind_host: String,

    /// Port to bind the HTTP server to
    ///
    /// Env: STORY_EXPRESS_PORT
    /// Default: 8080
    pub port: u16,
}

pub(crate) fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

pub(crate) fn default_port() -> u16 {
    8080
}

impl ExpressConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::ValidateError(
                "Express port cannot be 0".to_string(),
            ));
        }

        if IpAddr::from_str(&self.bind_host).is_err() {
            return Err(ConfigError::ValidateError(format!(
                "Invalid bind host '{}': must be an IP address",
                self.bind_host
            )));
        }

        Ok(())
    }
}

impl Default for ExpressConfig {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_express_config() {
        let config = ExpressConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_host, "127.0.0.1");
    }

    #[test]
    fn test_validate_port_zero() {
        let config = ExpressConfig {
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_port_valid() {
        let config = ExpressConfig {
            port: 3000,
            ..Default::default()
        };
        assert!(config.validate().is_ok())
    }

    #[test]
    fn test_validate_bind_host_not_ip() {
        let config = ExpressConfig {
            bind_host: "localhost".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
