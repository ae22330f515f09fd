// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{Json, extract::State};
use chrono::Utc;

use crate::state::AppState;
use crate::story::{Statistics, compute_statistics};

pub async fn get_statistics(State(state): State<AppState>) -> Json<Statistics> {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
    Json(compute_statistics(
        &state.store.entries(),
        now,
        &state.config.contract.default_category,
    ))
}
