// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{Router, routing::get};

use crate::{
    handlers::streak,
    routes::{API_VERSION, RegisterRoute, RouteRegistry},
    state::AppState,
};

pub fn routes(registry: &RouteRegistry) -> Router<AppState> {
    Router::new()
        .route_registered(registry, API_VERSION, "/streak", "get", get(streak::get_own_streak))
        .route_registered(
            registry,
            API_VERSION,
            "/streak/:address",
            "get",
            get(streak::get_streak),
        )
}
