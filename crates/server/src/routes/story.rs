// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    handlers::story,
    routes::{API_VERSION, RegisterRoute, RouteRegistry},
    state::AppState,
};

pub fn routes(registry: &RouteRegistry) -> Router<AppState> {
    Router::new()
        .route_registered(registry, API_VERSION, "/story", "get", get(story::get_story))
        .route_registered(
            registry,
            API_VERSION,
            "/story/entries",
            "get",
            get(story::get_entries),
        )
        .route_registered(
            registry,
            API_VERSION,
            "/story/refresh",
            "post",
            post(story::post_refresh),
        )
}
