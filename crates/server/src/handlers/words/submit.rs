// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::chain::{ChainError, ContractCall};
use crate::handlers::error::error_response;
use crate::metrics::registry::WORD_SUBMISSIONS;
use crate::state::AppState;
use crate::story::{WordError, validate_word};

/// Request body for word submission.
#[derive(Debug, Deserialize)]
pub struct SubmitWordRequest {
    pub word: Option<String>,
    pub category: Option<String>,
}

/// Response for an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmitWordResponse {
    pub txid: String,
    pub word: String,
    pub category: String,
    pub sender: String,
}

/// Errors that can occur during word submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error(transparent)]
    Invalid(#[from] WordError),

    #[error("Submission rejected: {0}")]
    Rejected(#[source] ChainError),
}

const SUBMIT_FAILED: &str = "Failed to submit word.";

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        match self {
            SubmitError::NotConnected => error_response(
                StatusCode::UNAUTHORIZED,
                SUBMIT_FAILED,
                "Connect a wallet before adding a word.",
            ),
            SubmitError::Invalid(err) => {
                error_response(StatusCode::BAD_REQUEST, SUBMIT_FAILED, err.to_string())
            }
            SubmitError::Rejected(err) => {
                error_response(StatusCode::BAD_GATEWAY, SUBMIT_FAILED, err.user_message())
            }
        }
    }
}

/// Validate and submit `add-word(word, category)` through the contract writer.
///
/// Acceptance triggers an immediate refresh; no retry is attempted on rejection.
pub async fn submit_word(
    State(state): State<AppState>,
    Json(body): Json<SubmitWordRequest>,
) -> Result<Json<SubmitWordResponse>, SubmitError> {
    let sender = state
        .connected_address()
        .await
        .ok_or(SubmitError::NotConnected)?;

    let word = validate_word(
        body.word.as_deref().unwrap_or_default(),
        body.category.as_deref(),
        &state.config.contract.default_category,
    )?;

    let call = ContractCall::add_word(
        state.config.contract.contract_id(),
        state.config.contract.network,
        &word,
    );

    let submission = match state.writer.call_public_function(call).await {
        Ok(submission) => submission,
        Err(err) => {
            warn!(error = %err, word = %word.word, "Word submission rejected");
            WORD_SUBMISSIONS.with_label_values(&["rejected"]).inc();
            return Err(SubmitError::Rejected(err));
        }
    };

    info!(txid = %submission.txid, word = %word.word, sender = %sender, "Word submitted");
    WORD_SUBMISSIONS.with_label_values(&["accepted"]).inc();
    state.refresher.refresh_now();

    Ok(Json(SubmitWordResponse {
        txid: submission.txid,
        word: word.word,
        category: word.category,
        sender,
    }))
}
