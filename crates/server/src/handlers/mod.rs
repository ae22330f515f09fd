// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod contributors;
pub mod error;
pub mod health;
pub mod metrics;
pub mod statistics;
pub mod story;
pub mod streak;
pub mod version;
pub mod wallet;
pub mod words;
