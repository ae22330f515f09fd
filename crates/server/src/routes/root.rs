// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Root endpoint handler.
//!
//! Returns service information and the list of registered routes.

use crate::state::AppState;
use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};

use crate::routes::{RegisterRoute, RouteRegistry};

/// Handler for GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    let routes = state.route_registry.routes();

    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "contract": state.config.contract.contract_id(),
        "network": state.config.contract.network.as_str(),
        "listen": format!("{}:{}", state.config.express.bind_host, state.config.express.port),
        "routes": routes
    }))
}

pub fn routes(registry: &RouteRegistry) -> Router<AppState> {
    Router::new().route_registered(registry, "", "/", "get", get(root_handler))
}
