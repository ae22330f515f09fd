// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// The service stays healthy while the contract is unreachable; the last
/// fetch error is reported alongside.
pub async fn get_health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let snapshot = state.store.snapshot();
    let response = HealthResponse {
        status: "ok".to_string(),
        entries: snapshot.entries.len(),
        last_updated: snapshot.last_updated,
        last_error: snapshot.error,
    };

    (StatusCode::OK, Json(response))
}
