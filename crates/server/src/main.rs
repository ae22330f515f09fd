// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

#[cfg(not(target_os = "windows"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::net::{IpAddr, SocketAddr};

use config::{Args, StoryConfig};
use server::{app, logging, metrics, state};

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = StoryConfig::from_env_file(&args.env_file)?;

    // Held for the life of the process so buffered file logs are flushed.
    let _log_guard = logging::init(&config.log)?;

    if config.metrics.enabled {
        metrics::init(&config.metrics.prometheus_prefix)?;
        tracing::info!(
            prefix = %config.metrics.prometheus_prefix,
            "Prometheus metrics enabled at /metrics"
        );
    }

    let host: IpAddr = config.express.bind_host.parse()?;
    let addr = SocketAddr::new(host, config.express.port);

    let backend = state::Backend::from_config(&config)?;
    let state = state::AppState::new(config, backend);
    tracing::info!(
        contract = %state.config.contract.contract_id(),
        network = %state.config.contract.network,
        mode = ?state.config.poll.mode,
        "Story contract configured"
    );
    let poller = state.spawn_poller();

    let app = app::create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}
