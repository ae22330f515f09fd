// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub contract: String,
    pub network: String,
}

pub async fn get_version(State(state): State<AppState>) -> (StatusCode, Json<VersionResponse>) {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        contract: state.config.contract.contract_id(),
        network: state.config.contract.network.to_string(),
    };

    (StatusCode::OK, Json(response))
}
