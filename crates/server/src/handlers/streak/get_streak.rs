// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::state::AppState;
use crate::story::calculate_streak;

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub address: Option<String>,
    pub streak: u32,
}

fn streak_for(state: &AppState, address: Option<String>) -> StreakResponse {
    let streak = calculate_streak(&state.store.entries(), address.as_deref());
    StreakResponse { address, streak }
}

/// Streak of an arbitrary address.
pub async fn get_streak(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Json<StreakResponse> {
    Json(streak_for(&state, Some(address)))
}

/// Streak of the connected wallet; 0 with a null address when disconnected.
pub async fn get_own_streak(State(state): State<AppState>) -> Json<StreakResponse> {
    let address = state.connected_address().await;
    Json(streak_for(&state, address))
}
