// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use config::LogConfig;
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse Loki URL '{url}': {source}")]
    InvalidLokiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to configure Loki integration: {0}")]
    LokiError(#[from] tracing_loki::Error),

    #[error("Global subscriber already set: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Filter directive for a configured level. `http` keeps everything at info
/// and turns on request logging.
pub fn filter_directive(level: &str) -> &str {
    if level == "http" {
        "info,http=debug"
    } else {
        level
    }
}

pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(filter_directive(level)).map_err(|source| LoggingError::InvalidLogLevel {
        level: level.to_string(),
        source,
    })
}

/// Install the global subscriber.
///
/// Console output is always on; file output (size-rotated `logs.log`,
/// `logs.log.1`, ...) and Loki shipping are optional. The returned guard
/// flushes the file writer and must be held for the life of the process.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(&config.level)?;

    let loki_layer = match config.loki_url.as_deref() {
        Some(url) => {
            let parsed_url = url::Url::parse(url).map_err(|source| LoggingError::InvalidLokiUrl {
                url: url.to_string(),
                source,
            })?;
            let (layer, task) = tracing_loki::builder()
                .label("service", "diary-api")?
                .extra_field("pid", format!("{}", std::process::id()))?
                .build_url(parsed_url)?;
            tokio::spawn(task);
            Some(layer)
        }
        None => None,
    };

    let console_layer = if config.json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(!config.strip_ansi)
            .boxed()
    };

    let mut guard = None;
    let file_layer = if config.write {
        std::fs::create_dir_all(&config.write_path)?;

        // write_max_files counts the live file too.
        let file_appender = BasicRollingFileAppender::new(
            PathBuf::from(&config.write_path).join("logs.log"),
            RollingConditionBasic::new().max_size(config.write_max_file_size),
            config.write_max_files.saturating_sub(1),
        )?;
        let (writer, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        Some(if config.json {
            fmt::layer().json().with_writer(writer).boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(writer)
                .boxed()
        })
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .with(loki_layer)
        .try_init()?;

    Ok(guard)
}
