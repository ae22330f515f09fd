// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub error: String,
    pub cause: String,
}

pub fn error_response(status: StatusCode, error: &str, cause: impl Into<String>) -> Response {
    let body = Json(ErrorBody {
        code: status.as_u16(),
        error: error.to_string(),
        cause: cause.into(),
    });
    (status, body).into_response()
}
