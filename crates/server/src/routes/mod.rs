// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod contributors;
pub mod health;
pub mod metrics;
pub mod registry;
pub mod root;
pub mod statistics;
pub mod story;
pub mod streak;
pub mod version;
pub mod wallet;
pub mod words;

pub use registry::{API_VERSION, RegisterRoute, RouteRegistry};
