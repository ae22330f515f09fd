// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::time::Duration;

use config::{RetrievalMode, StoryConfig};
use serde_json::Value;
use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

use crate::chain::{ChainError, ContractReader, ReadOnlyCall, RetryPolicy};
use crate::metrics::registry::CHAIN_CALLS;
use crate::story::{DecodeError, StoryDecoder, StoryEntry};

/// Upper bound for preallocating a paged story.
const MAX_PREALLOCATED: usize = 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("Failed to decode {function} response: {source}")]
    Decode {
        function: &'static str,
        #[source]
        source: DecodeError,
    },
}

impl FetchError {
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Chain(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

fn decode_error(function: &'static str) -> impl FnOnce(DecodeError) -> FetchError {
    move |source| FetchError::Decode { function, source }
}

/// Reads the full story from the contract in the configured retrieval mode.
pub struct StoryFetcher {
    reader: Arc<dyn ContractReader>,
    decoder: StoryDecoder,
    retry: RetryPolicy,
    mode: RetrievalMode,
    api_delay: Duration,
}

impl StoryFetcher {
    pub fn new(
        reader: Arc<dyn ContractReader>,
        decoder: StoryDecoder,
        retry: RetryPolicy,
        mode: RetrievalMode,
        api_delay: Duration,
    ) -> Self {
        Self {
            reader,
            decoder,
            retry,
            mode,
            api_delay,
        }
    }

    pub fn from_config(reader: Arc<dyn ContractReader>, config: &StoryConfig) -> Self {
        Self::new(
            reader,
            StoryDecoder::new(config.contract.default_category.clone()),
            RetryPolicy::from_config(&config.poll),
            config.poll.mode,
            config.poll.api_delay(),
        )
    }

    pub fn mode(&self) -> RetrievalMode {
        self.mode
    }

    async fn read(&self, call: ReadOnlyCall) -> Result<Value, ChainError> {
        CHAIN_CALLS.with_label_values(&[call.function.as_str()]).inc();
        let reader = self.reader.as_ref();
        let operation = call.function.clone();
        self.retry
            .run(&operation, move || reader.call_read_only(call.clone()))
            .await
    }

    /// Fetch every entry. Any transport failure that survives retries aborts
    /// the whole fetch.
    pub async fn fetch(&self) -> Result<Vec<StoryEntry>, FetchError> {
        match self.mode {
            RetrievalMode::Bulk => {
                let value = self.read(ReadOnlyCall::story()).await?;
                self.decoder
                    .entries(&value)
                    .map_err(decode_error("get-story"))
            }
            RetrievalMode::Paged => self.fetch_paged().await,
        }
    }

    async fn fetch_paged(&self) -> Result<Vec<StoryEntry>, FetchError> {
        let value = self.read(ReadOnlyCall::word_count()).await?;
        let count = self
            .decoder
            .count(&value)
            .map_err(decode_error("get-word-count"))?
            .unwrap_or(0);

        let capacity = usize::try_from(count)
            .unwrap_or(MAX_PREALLOCATED)
            .min(MAX_PREALLOCATED);
        let mut entries = Vec::with_capacity(capacity);
        for id in 0..count {
            sleep(self.api_delay).await;
            let value = self.read(ReadOnlyCall::word(id)).await?;
            match self
                .decoder
                .entry(&value, id)
                .map_err(decode_error("get-word"))?
            {
                Some(entry) => entries.push(entry),
                None => debug!(id, "Skipping word without a record"),
            }
        }
        Ok(entries)
    }
}
