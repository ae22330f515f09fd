// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;
use crate::story::{Contributor, compute_contributors, short_address};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorView {
    #[serde(flatten)]
    pub contributor: Contributor,
    pub short_address: String,
}

/// Leaderboard derived from the current snapshot, most words first.
pub async fn get_contributors(State(state): State<AppState>) -> Json<Vec<ContributorView>> {
    let contributors = compute_contributors(&state.store.entries())
        .into_iter()
        .map(|contributor| ContributorView {
            short_address: short_address(&contributor.address),
            contributor,
        })
        .collect();
    Json(contributors)
}
