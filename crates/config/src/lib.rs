// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod contract;
mod error;
mod express;
mod log;
mod metrics;
mod poll;
mod wallet;

pub use args::Args;
pub use contract::{ContractBackend, ContractConfig, Network};
pub use error::ConfigError;
pub use express::ExpressConfig;
pub use log::LogConfig;
pub use metrics::{MetricsConfig, MetricsError};
pub use poll::{PollConfig, RetrievalMode};
pub use wallet::WalletConfig;

use serde::Deserialize;

const ENV_PREFIX: &str = "STORY_";

/// Flat view of the `STORY_*` environment, as envy sees it.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "express::default_bind_host")]
    express_bind_host: String,
    #[serde(default = "express::default_port")]
    express_port: u16,

    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,
    #[serde(default)]
    log_loki_url: Option<String>,

    #[serde(default = "contract::default_backend")]
    contract_backend: String,
    #[serde(default = "contract::default_api_url")]
    contract_api_url: String,
    #[serde(default)]
    contract_address: String,
    #[serde(default = "contract::default_name")]
    contract_name: String,
    #[serde(default = "contract::default_network")]
    contract_network: String,
    #[serde(default)]
    contract_sender: Option<String>,
    #[serde(default = "contract::default_category")]
    contract_default_category: String,

    #[serde(default = "poll::default_interval_ms")]
    poll_interval_ms: u64,
    #[serde(default = "poll::default_api_delay_ms")]
    poll_api_delay_ms: u64,
    #[serde(default = "poll::default_max_retries")]
    poll_max_retries: u32,
    #[serde(default = "poll::default_initial_retry_delay_ms")]
    poll_initial_retry_delay_ms: u64,
    #[serde(default = "poll::default_rate_limit_wait_ms")]
    poll_rate_limit_wait_ms: u64,
    #[serde(default = "poll::default_request_timeout_ms")]
    poll_request_timeout_ms: u64,
    #[serde(default = "poll::default_mode")]
    poll_mode: String,

    #[serde(default)]
    wallet_bridge_url: Option<String>,
    #[serde(default)]
    wallet_address: Option<String>,

    #[serde(default)]
    metrics_enabled: bool,
    #[serde(default = "metrics::default_prometheus_prefix")]
    metrics_prometheus_prefix: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<EnvConfig> for StoryConfig {
    type Error = ConfigError;

    fn try_from(env: EnvConfig) -> Result<Self, Self::Error> {
        let sender = non_empty(env.contract_sender).unwrap_or_else(|| env.contract_address.clone());

        Ok(Self {
            express: ExpressConfig {
                bind_host: env.express_bind_host,
                port: env.express_port,
            },
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
                loki_url: non_empty(env.log_loki_url),
            },
            contract: ContractConfig {
                backend: env.contract_backend.parse()?,
                api_url: env.contract_api_url,
                address: env.contract_address,
                name: env.contract_name,
                network: env.contract_network.parse()?,
                sender,
                default_category: env.contract_default_category,
            },
            poll: PollConfig {
                interval_ms: env.poll_interval_ms,
                api_delay_ms: env.poll_api_delay_ms,
                max_retries: env.poll_max_retries,
                initial_retry_delay_ms: env.poll_initial_retry_delay_ms,
                rate_limit_wait_ms: env.poll_rate_limit_wait_ms,
                request_timeout_ms: env.poll_request_timeout_ms,
                mode: env.poll_mode.parse()?,
            },
            wallet: WalletConfig {
                bridge_url: non_empty(env.wallet_bridge_url),
                address: non_empty(env.wallet_address),
            },
            metrics: MetricsConfig {
                enabled: env.metrics_enabled,
                prometheus_prefix: env.metrics_prometheus_prefix,
            },
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoryConfig {
    pub express: ExpressConfig,
    pub log: LogConfig,
    pub contract: ContractConfig,
    pub poll: PollConfig,
    pub wallet: WalletConfig,
    pub metrics: MetricsConfig,
}

impl StoryConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = envy::prefixed(ENV_PREFIX).from_env::<EnvConfig>()?;
        Self::finish(env)
    }

    /// Seed the environment from `env_file` (missing file is not an error), then load.
    pub fn from_env_file(env_file: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file) {
            Ok(()) => {}
            Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(ConfigError::EnvFileError {
                    path: env_file.to_string(),
                    source,
                });
            }
        }
        Self::from_env()
    }

    /// Load configuration from explicit `(name, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed(ENV_PREFIX).from_iter::<_, EnvConfig>(vars)?;
        Self::finish(env)
    }

    fn finish(env: EnvConfig) -> Result<Self, ConfigError> {
        let config = Self::try_from(env)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.express.validate()?;
        self.log.validate()?;
        self.contract.validate()?;
        self.poll.validate()?;
        self.wallet.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}
