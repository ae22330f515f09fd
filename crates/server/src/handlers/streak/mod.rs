// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod get_streak;

pub use get_streak::{StreakResponse, get_own_streak, get_streak};
