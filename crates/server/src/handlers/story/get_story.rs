// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;
use crate::story::{StoryEntry, story_text};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryResponse {
    /// Words joined by single spaces.
    pub text: String,
    pub word_count: usize,
    pub entries: Vec<StoryEntry>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

pub async fn get_story(State(state): State<AppState>) -> (StatusCode, Json<StoryResponse>) {
    let snapshot = state.store.snapshot();
    let response = StoryResponse {
        text: story_text(&snapshot.entries),
        word_count: snapshot.entries.len(),
        entries: snapshot.entries,
        is_loading: snapshot.is_loading,
        error: snapshot.error,
        last_updated: snapshot.last_updated,
    };

    (StatusCode::OK, Json(response))
}

pub async fn get_entries(State(state): State<AppState>) -> Json<Vec<StoryEntry>> {
    Json(state.store.entries())
}
