// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    handlers::wallet,
    routes::{API_VERSION, RegisterRoute, RouteRegistry},
    state::AppState,
};

pub fn routes(registry: &RouteRegistry) -> Router<AppState> {
    Router::new()
        .route_registered(registry, API_VERSION, "/wallet", "get", get(wallet::get_wallet))
        .route_registered(
            registry,
            API_VERSION,
            "/wallet/connect",
            "post",
            post(wallet::connect),
        )
        .route_registered(
            registry,
            API_VERSION,
            "/wallet/disconnect",
            "post",
            post(wallet::disconnect),
        )
}
