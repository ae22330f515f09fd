// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Story handlers: the rendered story, raw entries and manual refresh.

mod get_story;
mod post_refresh;

pub use get_story::{StoryResponse, get_entries, get_story};
pub use post_refresh::{RefreshResponse, post_refresh};
