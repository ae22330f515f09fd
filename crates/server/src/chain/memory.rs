// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-process story contract.
//!
//! Models the deployed contract closely enough to run the service without a
//! node: `get-word-count`, `get-word`, `get-story` and `add-word` with the
//! contract's error codes. It also plays the wallet, so submissions are
//! attributed to the configured address.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::error::ChainError;
use super::reader::{ContractReader, ReadOnlyCall};
use super::wallet::Wallet;
use super::writer::{ADD_WORD_FUNCTION, ContractCall, ContractWriter, TxSubmission};
use crate::clarity::ClarityValue;
use crate::story::{MAX_WORD_LENGTH, StoryEntry};

pub const ERR_WORD_NOT_FOUND: u128 = 300;
pub const ERR_INVALID_WORD: u128 = 301;

pub const DEFAULT_WALLET_ADDRESS: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

#[derive(Default)]
struct State {
    words: Vec<StoryEntry>,
    /// Errors returned by the next read-only calls, in order.
    injected: VecDeque<ChainError>,
    txs: u64,
}

pub struct InMemoryContract {
    state: Mutex<State>,
    address: String,
    reads: AtomicU64,
}

impl InMemoryContract {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            address: address.into(),
            reads: AtomicU64::new(0),
        }
    }

    /// Start with `entries` already stored; ids are reassigned in order.
    pub fn with_entries(address: impl Into<String>, entries: Vec<StoryEntry>) -> Self {
        let contract = Self::new(address);
        if let Ok(mut state) = contract.state.lock() {
            state.words = entries
                .into_iter()
                .enumerate()
                .map(|(id, entry)| StoryEntry {
                    id: id as u64,
                    ..entry
                })
                .collect();
        }
        contract
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Make the next read-only call fail with `err`.
    pub fn fail_next(&self, err: ChainError) {
        if let Ok(mut state) = self.state.lock() {
            state.injected.push_back(err);
        }
    }

    /// Number of read-only calls served so far.
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn word_count(&self) -> usize {
        self.state.lock().map(|state| state.words.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, ChainError> {
        self.state
            .lock()
            .map_err(|_| ChainError::CallFailed("contract state poisoned".to_string()))
    }
}

impl Default for InMemoryContract {
    fn default() -> Self {
        Self::new(DEFAULT_WALLET_ADDRESS)
    }
}

fn word_tuple(entry: &StoryEntry) -> ClarityValue {
    ClarityValue::tuple([
        ("word", ClarityValue::ascii(entry.word.clone())),
        ("sender", ClarityValue::ascii(entry.sender.clone())),
        ("timestamp", ClarityValue::UInt(u128::from(entry.timestamp))),
        ("category", ClarityValue::ascii(entry.category.clone())),
    ])
}

fn ascii_argument(argument: Option<&ClarityValue>) -> Option<&str> {
    match argument {
        Some(ClarityValue::StringAscii(s)) => Some(s.as_str()),
        _ => None,
    }
}

#[async_trait]
impl ContractReader for InMemoryContract {
    async fn call_read_only(&self, call: ReadOnlyCall) -> Result<Value, ChainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock()?;
        if let Some(err) = state.injected.pop_front() {
            return Err(err);
        }

        let result = match call.function.as_str() {
            "get-word-count" => ClarityValue::ok(ClarityValue::UInt(state.words.len() as u128)),
            "get-word" => {
                let entry = match call.arguments.first() {
                    Some(ClarityValue::UInt(id)) => usize::try_from(*id)
                        .ok()
                        .and_then(|id| state.words.get(id)),
                    _ => {
                        return Err(ChainError::InvalidArgument(
                            "get-word expects a uint id".to_string(),
                        ));
                    }
                };
                match entry {
                    Some(entry) => ClarityValue::ok(word_tuple(entry)),
                    None => ClarityValue::err(ClarityValue::UInt(ERR_WORD_NOT_FOUND)),
                }
            }
            "get-story" => ClarityValue::ok(ClarityValue::List(
                state.words.iter().map(word_tuple).collect(),
            )),
            other => {
                return Err(ChainError::CallFailed(format!(
                    "Unknown read-only function '{}'",
                    other
                )));
            }
        };
        Ok(result.to_json())
    }
}

#[async_trait]
impl ContractWriter for InMemoryContract {
    async fn call_public_function(&self, call: ContractCall) -> Result<TxSubmission, ChainError> {
        if call.function != ADD_WORD_FUNCTION {
            return Err(ChainError::CallFailed(format!(
                "Unknown public function '{}'",
                call.function
            )));
        }

        let word = ascii_argument(call.arguments.first()).unwrap_or_default();
        if word.is_empty() || word.len() > MAX_WORD_LENGTH {
            return Err(ChainError::CallFailed(format!(
                "(err u{})",
                ERR_INVALID_WORD
            )));
        }
        let category = ascii_argument(call.arguments.get(1)).unwrap_or_default();

        let timestamp = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
        let mut state = self.lock()?;
        let id = state.words.len() as u64;
        state.words.push(StoryEntry {
            id,
            word: word.to_string(),
            sender: self.address.clone(),
            timestamp,
            category: category.to_string(),
        });
        state.txs += 1;
        debug!(id, word, "Stored word");

        Ok(TxSubmission {
            txid: format!("0x{:064x}", state.txs),
        })
    }
}

#[async_trait]
impl Wallet for InMemoryContract {
    async fn connect(&self) -> Result<Vec<String>, ChainError> {
        Ok(vec![self.address.clone()])
    }

    async fn disconnect(&self) -> Result<(), ChainError> {
        Ok(())
    }
}
