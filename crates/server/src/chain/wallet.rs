// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wallet collaborator and a JSON-RPC 2.0 bridge client.
//!
//! The bridge holds the user's keys; this service never signs anything itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::error::ChainError;
use super::writer::{ContractCall, ContractWriter, TxSubmission};
use crate::clarity::ClarityValue;

#[async_trait]
pub trait Wallet: Send + Sync {
    /// Connect and return the wallet's addresses, primary first.
    async fn connect(&self) -> Result<Vec<String>, ChainError>;

    async fn disconnect(&self) -> Result<(), ChainError>;
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    message: String,
}

/// Client for a wallet bridge exposing `getAddresses`, `stx_callContract` and
/// `stx_disconnect` over JSON-RPC 2.0.
pub struct WalletBridge {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl WalletBridge {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "Wallet bridge request");

        let response = self
            .client
            .post(&self.url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": params,
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChainError::from_status(status.as_u16(), body));
        }

        let parsed: RpcResponse =
            serde_json::from_str(&body).map_err(|e| ChainError::InvalidResponse(e.to_string()))?;
        if let Some(error) = parsed.error {
            return Err(ChainError::Rejected(format!(
                "{} (code {})",
                error.message, error.code
            )));
        }
        Ok(parsed.result.unwrap_or(Value::Null))
    }
}

/// Addresses from either `{ addresses: [{ address }] }` or a plain array.
fn parse_addresses(result: &Value) -> Vec<String> {
    let items: &[Value] = match result {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("addresses") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(address) => Some(address.clone()),
            Value::Object(entry) => entry
                .get("address")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .filter(|address| !address.trim().is_empty())
        .collect()
}

#[async_trait]
impl Wallet for WalletBridge {
    async fn connect(&self) -> Result<Vec<String>, ChainError> {
        let result = self.request("getAddresses", json!({})).await?;
        let addresses = parse_addresses(&result);
        if addresses.is_empty() {
            return Err(ChainError::InvalidResponse(
                "Wallet returned no addresses".to_string(),
            ));
        }
        info!(address = %addresses[0], "Wallet connected");
        Ok(addresses)
    }

    async fn disconnect(&self) -> Result<(), ChainError> {
        self.request("stx_disconnect", json!({})).await.map(|_| ())
    }
}

#[async_trait]
impl ContractWriter for WalletBridge {
    async fn call_public_function(&self, call: ContractCall) -> Result<TxSubmission, ChainError> {
        let function_args = call
            .arguments
            .iter()
            .map(ClarityValue::to_hex)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ChainError::InvalidArgument(e.to_string()))?;

        let result = self
            .request(
                "stx_callContract",
                json!({
                    "contract": call.contract,
                    "functionName": call.function,
                    "functionArgs": function_args,
                    "network": call.network.as_str(),
                    "postConditionMode": "deny",
                }),
            )
            .await?;

        let txid = result
            .get("txid")
            .or_else(|| result.get("txId"))
            .and_then(Value::as_str)
            .ok_or_else(|| ChainError::InvalidResponse("Missing txid".to_string()))?;

        info!(txid, function = %call.function, "Contract call submitted");
        Ok(TxSubmission {
            txid: txid.to_string(),
        })
    }
}

/// Stand-in used when no wallet bridge is configured; every call fails.
pub struct NoWallet;

const NO_BRIDGE: &str = "no wallet bridge configured (set STORY_WALLET_BRIDGE_URL)";

#[async_trait]
impl Wallet for NoWallet {
    async fn connect(&self) -> Result<Vec<String>, ChainError> {
        Err(ChainError::Unavailable(NO_BRIDGE.to_string()))
    }

    async fn disconnect(&self) -> Result<(), ChainError> {
        Ok(())
    }
}

#[async_trait]
impl ContractWriter for NoWallet {
    async fn call_public_function(&self, _call: ContractCall) -> Result<TxSubmission, ChainError> {
        Err(ChainError::Unavailable(NO_BRIDGE.to_string()))
    }
}
