// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{Router, middleware};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    logging::http_logger_middleware,
    metrics::metrics_middleware,
    routes::{self, API_VERSION},
    state::AppState,
};

/// Build the HTTP application.
///
/// API routes are nested under [`API_VERSION`]; `/` lists them. `/metrics`
/// and the metrics middleware are only mounted when metrics are enabled.
pub fn create_app(state: AppState) -> Router {
    let registry = &state.route_registry;

    let api = Router::new()
        .merge(routes::health::routes(registry))
        .merge(routes::version::routes(registry))
        .merge(routes::story::routes(registry))
        .merge(routes::contributors::routes(registry))
        .merge(routes::statistics::routes(registry))
        .merge(routes::streak::routes(registry))
        .merge(routes::wallet::routes(registry))
        .merge(routes::words::routes(registry));

    let mut app = Router::new()
        .merge(routes::root::routes(registry))
        .nest(API_VERSION, api);

    if state.config.metrics.enabled {
        app = app
            .merge(routes::metrics::routes())
            .layer(middleware::from_fn(metrics_middleware));
    }

    app.layer(middleware::from_fn(http_logger_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
