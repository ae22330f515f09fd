// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub status: &'static str,
}

/// Start an out-of-band fetch cycle and return without waiting for it.
pub async fn post_refresh(State(state): State<AppState>) -> (StatusCode, Json<RefreshResponse>) {
    debug!("Manual story refresh requested");
    state.refresher.refresh_now();
    (
        StatusCode::ACCEPTED,
        Json(RefreshResponse {
            status: "refreshing",
        }),
    )
}
