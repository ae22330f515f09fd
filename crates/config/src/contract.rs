// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Which contract collaborator the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractBackend {
    /// Local in-process story contract.
    Memory,
    /// Stacks node API (Hiro-compatible) plus a wallet bridge for submissions.
    Hiro,
}

impl FromStr for ContractBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "hiro" => Ok(Self::Hiro),
            other => Err(ConfigError::ValidateError(format!(
                "Invalid contract backend '{}'. Must be one of: memory, hiro",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            other => Err(ConfigError::ValidateError(format!(
                "Invalid network '{}'. Must be one of: mainnet, testnet, devnet",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContractConfig {
    /// Env: STORY_CONTRACT_BACKEND
    /// Valid values: memory, hiro
    /// Default: memory
    pub backend: ContractBackend,

    /// Base URL of the node API serving read-only calls
    ///
    /// Env: STORY_CONTRACT_API_URL
    /// Default: https://api.testnet.hiro.so
    pub api_url: String,

    /// Deployer address of the story contract
    ///
    /// Env: STORY_CONTRACT_ADDRESS
    /// Required for the hiro backend
    pub address: String,

    /// Env: STORY_CONTRACT_NAME
    /// Default: story-v2
    pub name: String,

    /// Env: STORY_CONTRACT_NETWORK
    /// Default: testnet
    pub network: Network,

    /// Sender address used for read-only calls
    ///
    /// Env: STORY_CONTRACT_SENDER
    /// Default: the contract address
    pub sender: String,

    /// Label used when an entry has no category
    ///
    /// Env: STORY_CONTRACT_DEFAULT_CATEGORY
    /// Default: general
    pub default_category: String,
}

pub(crate) fn default_backend() -> String {
    "memory".to_string()
}

pub(crate) fn default_api_url() -> String {
    "https://api.testnet.hiro.so".to_string()
}

pub(crate) fn default_name() -> String {
    "story-v2".to_string()
}

pub(crate) fn default_network() -> String {
    "testnet".to_string()
}

pub(crate) fn default_category() -> String {
    "general".to_string()
}

impl ContractConfig {
    /// Fully qualified contract identifier, `address.name`.
    pub fn contract_id(&self) -> String {
        format!("{}.{}", self.address, self.name)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidateError(
                "Contract name cannot be empty".to_string(),
            ));
        }

        if self.default_category.trim().is_empty() {
            return Err(ConfigError::ValidateError(
                "Default category cannot be empty".to_string(),
            ));
        }

        if self.backend == ContractBackend::Hiro {
            if self.address.is_empty() {
                return Err(ConfigError::ValidateError(
                    "Contract address is required for the hiro backend".to_string(),
                ));
            }

            let parsed = url::Url::parse(&self.api_url).map_err(|e| {
                ConfigError::ValidateError(format!("Invalid API URL '{}': {}", self.api_url, e))
            })?;
            match parsed.scheme() {
                "http" | "https" => {}
                scheme => {
                    return Err(ConfigError::ValidateError(format!(
                        "Invalid API URL scheme '{}'. Must be http:// or https://",
                        scheme
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            backend: ContractBackend::Memory,
            api_url: default_api_url(),
            address: String::new(),
            name: default_name(),
            network: Network::Testnet,
            sender: String::new(),
            default_category: default_category(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hiro_config() -> ContractConfig {
        ContractConfig {
            backend: ContractBackend::Hiro,
            address: "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_contract_config() {
        let config = ContractConfig::default();
        assert_eq!(config.backend, ContractBackend::Memory);
        assert_eq!(config.name, "story-v2");
        assert_eq!(config.default_category, "general");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hiro_requires_address() {
        let config = ContractConfig {
            address: String::new(),
            ..hiro_config()
        };
        assert!(config.validate().is_err());
        assert!(hiro_config().validate().is_ok());
    }

    #[test]
    fn test_hiro_rejects_ws_scheme() {
        let config = ContractConfig {
            api_url: "ws://localhost:3999".to_string(),
            ..hiro_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_contract_id() {
        let config = hiro_config();
        assert_eq!(
            config.contract_id(),
            "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.story-v2"
        );
    }

    #[test]
    fn test_parse_backend_and_network() {
        assert_eq!("HIRO".parse::<ContractBackend>().unwrap(), ContractBackend::Hiro);
        assert!("ipfs".parse::<ContractBackend>().is_err());
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert!("regtest".parse::<Network>().is_err());
    }
}
