// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use async_trait::async_trait;
use config::Network;
use serde::{Deserialize, Serialize};

use super::error::ChainError;
use crate::clarity::ClarityValue;
use crate::story::ValidWord;

pub const ADD_WORD_FUNCTION: &str = "add-word";

/// A public (state-changing) contract function invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// `<address>.<name>`
    pub contract: String,
    pub function: String,
    pub arguments: Vec<ClarityValue>,
    pub network: Network,
}

impl ContractCall {
    /// `add-word(word, category)` for a validated submission.
    pub fn add_word(contract: impl Into<String>, network: Network, word: &ValidWord) -> Self {
        Self {
            contract: contract.into(),
            function: ADD_WORD_FUNCTION.to_string(),
            arguments: vec![
                ClarityValue::ascii(word.word.clone()),
                ClarityValue::ascii(word.category.clone()),
            ],
            network,
        }
    }
}

/// Acknowledgement that a transaction was accepted for broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxSubmission {
    pub txid: String,
}

/// Submits public contract calls. Acceptance only; confirmation is not awaited.
#[async_trait]
pub trait ContractWriter: Send + Sync {
    async fn call_public_function(&self, call: ContractCall) -> Result<TxSubmission, ChainError>;
}
