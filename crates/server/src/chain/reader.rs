// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use async_trait::async_trait;
use config::ContractConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ChainError;
use crate::clarity::ClarityValue;

/// A read-only contract function invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyCall {
    pub function: String,
    pub arguments: Vec<ClarityValue>,
}

impl ReadOnlyCall {
    pub fn new(function: impl Into<String>, arguments: Vec<ClarityValue>) -> Self {
        Self {
            function: function.into(),
            arguments,
        }
    }

    pub fn word_count() -> Self {
        Self::new("get-word-count", Vec::new())
    }

    pub fn word(id: u64) -> Self {
        Self::new("get-word", vec![ClarityValue::UInt(u128::from(id))])
    }

    pub fn story() -> Self {
        Self::new("get-story", Vec::new())
    }
}

/// Source of read-only contract results.
///
/// Implementations return the loosely typed JSON rendering of the Clarity
/// result value; decoding into story entries happens in `story::decode`.
#[async_trait]
pub trait ContractReader: Send + Sync {
    async fn call_read_only(&self, call: ReadOnlyCall) -> Result<Value, ChainError>;
}

#[derive(Debug, Serialize)]
struct CallReadRequest<'a> {
    sender: &'a str,
    arguments: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CallReadResponse {
    okay: bool,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    cause: Option<String>,
}

/// Reads from a Stacks node API (`/v2/contracts/call-read`).
#[derive(Clone)]
pub struct HiroReadClient {
    client: reqwest::Client,
    api_url: String,
    contract_address: String,
    contract_name: String,
    sender: String,
}

impl HiroReadClient {
    pub fn new(config: &ContractConfig, timeout: Duration) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            contract_address: config.address.clone(),
            contract_name: config.name.clone(),
            sender: config.sender.clone(),
        })
    }

    fn endpoint(&self, function: &str) -> String {
        format!(
            "{}/v2/contracts/call-read/{}/{}/{}",
            self.api_url, self.contract_address, self.contract_name, function
        )
    }
}

#[async_trait]
impl ContractReader for HiroReadClient {
    async fn call_read_only(&self, call: ReadOnlyCall) -> Result<Value, ChainError> {
        let arguments = call
            .arguments
            .iter()
            .map(ClarityValue::to_hex)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ChainError::InvalidArgument(e.to_string()))?;

        let url = self.endpoint(&call.function);
        debug!(function = %call.function, url = %url, "Calling read-only function");

        let response = self
            .client
            .post(&url)
            .json(&CallReadRequest {
                sender: &self.sender,
                arguments,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(function = %call.function, status = status.as_u16(), body = %body, "Non-success status");
            return Err(ChainError::from_status(status.as_u16(), body));
        }

        let parsed: CallReadResponse =
            serde_json::from_str(&body).map_err(|e| ChainError::InvalidResponse(e.to_string()))?;
        if !parsed.okay {
            return Err(ChainError::CallFailed(
                parsed.cause.unwrap_or_else(|| "unknown cause".to_string()),
            ));
        }

        let result = parsed
            .result
            .ok_or_else(|| ChainError::InvalidResponse("Missing result".to_string()))?;
        let value = ClarityValue::from_hex(&result)
            .map_err(|e| ChainError::InvalidResponse(e.to_string()))?;
        Ok(value.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ADDRESS: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

    fn client(uri: String) -> HiroReadClient {
        let config = ContractConfig {
            api_url: uri,
            address: ADDRESS.to_string(),
            sender: ADDRESS.to_string(),
            ..ContractConfig::default()
        };
        HiroReadClient::new(&config, Duration::from_secs(1)).unwrap()
    }

    fn read_path(function: &str) -> String {
        format!("/v2/contracts/call-read/{}/story-v2/{}", ADDRESS, function)
    }

    #[tokio::test]
    async fn call_read_decodes_clarity_result() {
        let server = MockServer::start().await;
        let result = ClarityValue::ok(ClarityValue::UInt(3)).to_hex().unwrap();
        Mock::given(method("POST"))
            .and(path(read_path("get-word-count")))
            .and(body_json(json!({ "sender": ADDRESS, "arguments": [] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "okay": true, "result": result })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let value = client(server.uri())
            .call_read_only(ReadOnlyCall::word_count())
            .await
            .unwrap();
        assert_eq!(
            value,
            json!({ "type": "ok", "value": { "type": "uint", "value": "3" } })
        );
    }

    #[tokio::test]
    async fn call_read_serializes_arguments() {
        let server = MockServer::start().await;
        let argument = ClarityValue::UInt(5).to_hex().unwrap();
        let result = ClarityValue::err(ClarityValue::UInt(300)).to_hex().unwrap();
        Mock::given(method("POST"))
            .and(path(read_path("get-word")))
            .and(body_json(json!({ "sender": ADDRESS, "arguments": [argument] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "okay": true, "result": result })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let value = client(server.uri())
            .call_read_only(ReadOnlyCall::word(5))
            .await
            .unwrap();
        assert_eq!(value["type"], "err");
    }

    #[tokio::test]
    async fn call_read_maps_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(read_path("get-story")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "okay": false,
                "cause": "Unchecked(NoSuchContract)"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(read_path("get-word-count")))
            .respond_with(ResponseTemplate::new(429).set_body_string("Per-minute rate limit exceeded"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(read_path("get-word")))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client(server.uri());
        assert_eq!(
            client.call_read_only(ReadOnlyCall::story()).await.unwrap_err(),
            ChainError::CallFailed("Unchecked(NoSuchContract)".to_string())
        );
        assert!(matches!(
            client.call_read_only(ReadOnlyCall::word_count()).await.unwrap_err(),
            ChainError::RateLimited {
                per_minute: true,
                ..
            }
        ));
        assert!(matches!(
            client.call_read_only(ReadOnlyCall::word(0)).await.unwrap_err(),
            ChainError::InvalidResponse(_)
        ));
    }

    #[tokio::test]
    async fn call_read_connection_refused_is_network_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let err = client(uri)
            .call_read_only(ReadOnlyCall::story())
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::Network(_)));
        assert!(err.is_transient());
    }
}
