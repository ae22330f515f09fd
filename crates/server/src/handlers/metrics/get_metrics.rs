// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{http::StatusCode, response::IntoResponse};

use crate::handlers::error::error_response;

/// Handler for Prometheus metrics endpoint (text format)
pub async fn get_metrics() -> impl IntoResponse {
    match crate::metrics::gather_metrics() {
        Ok(metrics) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4")],
            metrics,
        )
            .into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to gather metrics.",
            e.to_string(),
        ),
    }
}
