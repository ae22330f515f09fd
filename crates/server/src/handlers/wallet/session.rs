// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::chain::ChainError;
use crate::handlers::error::error_response;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WalletStatus {
    pub connected: bool,
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
}

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Failed to connect wallet.")]
    ConnectFailed(#[source] ChainError),
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        match self {
            WalletError::ConnectFailed(ChainError::Unavailable(cause)) => error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Failed to connect wallet.",
                cause,
            ),
            WalletError::ConnectFailed(err) => error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to connect wallet.",
                err.user_message(),
            ),
        }
    }
}

/// Connect through the wallet collaborator; the primary address becomes the session.
pub async fn connect(State(state): State<AppState>) -> Result<Json<WalletStatus>, WalletError> {
    let addresses = state
        .wallet
        .connect()
        .await
        .map_err(WalletError::ConnectFailed)?;
    let address = addresses.first().cloned();

    *state.session.write().await = address.clone();
    info!(address = ?address, "Wallet session started");

    Ok(Json(WalletStatus {
        connected: address.is_some(),
        address,
        addresses,
    }))
}

/// Clear the session. A wallet that fails to acknowledge is logged, not reported.
pub async fn disconnect(State(state): State<AppState>) -> Json<WalletStatus> {
    let previous = state.session.write().await.take();
    if let Err(err) = state.wallet.disconnect().await {
        warn!(error = %err, "Wallet did not acknowledge disconnect");
    }
    info!(address = ?previous, "Wallet session ended");

    Json(WalletStatus {
        connected: false,
        address: None,
        addresses: Vec::new(),
    })
}

pub async fn get_wallet(State(state): State<AppState>) -> Json<WalletStatus> {
    let address = state.connected_address().await;
    Json(WalletStatus {
        connected: address.is_some(),
        address,
        addresses: Vec::new(),
    })
}
