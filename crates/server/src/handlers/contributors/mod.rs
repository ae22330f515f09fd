// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod get_contributors;

pub use get_contributors::{ContributorView, get_contributors};
