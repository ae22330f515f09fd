// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::fetcher::FetchError;
use crate::metrics::registry::STORY_ENTRIES;
use crate::story::StoryEntry;

/// Current view of the story as last fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySnapshot {
    pub entries: Vec<StoryEntry>,
    /// User-facing message of the last failed cycle; cleared by a successful one.
    pub error: Option<String>,
    pub is_loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for StorySnapshot {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            error: None,
            // Nothing fetched yet.
            is_loading: true,
            last_updated: None,
        }
    }
}

/// Shared owner of the [`StorySnapshot`]. Cloning shares the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct StoryStore {
    inner: Arc<RwLock<StorySnapshot>>,
}

impl StoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StorySnapshot {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn entries(&self) -> Vec<StoryEntry> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clone()
    }

    pub fn begin_loading(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .is_loading = true;
    }

    /// Apply the outcome of a fetch cycle.
    ///
    /// Success replaces the entries wholesale; failure keeps them and records
    /// the error. Returns whether the cycle succeeded.
    pub fn apply(&self, outcome: Result<Vec<StoryEntry>, FetchError>) -> bool {
        let mut snapshot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        snapshot.is_loading = false;
        match outcome {
            Ok(entries) => {
                STORY_ENTRIES.set(entries.len() as i64);
                snapshot.entries = entries;
                snapshot.error = None;
                snapshot.last_updated = Some(Utc::now());
                true
            }
            Err(err) => {
                snapshot.error = Some(err.user_message());
                false
            }
        }
    }
}
