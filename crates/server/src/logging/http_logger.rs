// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Logs every request under the `http` target.
///
/// - DEBUG for 2xx/3xx responses (visible with `STORY_LOG_LEVEL=http`)
/// - WARN for 4xx responses
/// - ERROR for 5xx responses
///
/// Message format: "METHOD /path?query STATUS DURATIONms",
/// e.g. "GET /v1/streak/ST1PQ...GM 200 3ms"
pub async fn http_logger_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    match status {
        200..=399 => tracing::debug!(
            target: "http",
            method = %method,
            path = %uri,
            route = %route,
            status,
            duration_ms,
            "{} {} {} {}ms",
            method,
            uri,
            status,
            duration_ms
        ),
        400..=499 => tracing::warn!(
            target: "http",
            method = %method,
            path = %uri,
            route = %route,
            status,
            duration_ms,
            "{} {} {} {}ms",
            method,
            uri,
            status,
            duration_ms
        ),
        _ => tracing::error!(
            target: "http",
            method = %method,
            path = %uri,
            route = %route,
            status,
            duration_ms,
            "{} {} {} {}ms",
            method,
            uri,
            status,
            duration_ms
        ),
    }

    response
}
