// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the wallet bridge that signs contract calls
    ///
    /// Env: STORY_WALLET_BRIDGE_URL
    /// Default: unset
    pub bridge_url: Option<String>,

    /// Address reported by the in-memory wallet
    ///
    /// Env: STORY_WALLET_ADDRESS
    /// Default: unset
    pub address: Option<String>,
}

impl WalletConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.bridge_url {
            let parsed = url::Url::parse(url).map_err(|e| {
                ConfigError::ValidateError(format!("Invalid wallet bridge URL '{}': {}", url, e))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::ValidateError(format!(
                    "Invalid wallet bridge URL scheme '{}'. Must be http:// or https://",
                    parsed.scheme()
                )));
            }
        }

        if let Some(address) = &self.address
            && address.trim().is_empty()
        {
            return Err(ConfigError::ValidateError(
                "Wallet address cannot be blank".to_string(),
            ));
        }

        Ok(())
    }
}
