// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Story domain: entries, response decoding and derived views.

pub mod contributors;
pub mod decode;
pub mod entry;
pub mod statistics;
pub mod streak;
pub mod validate;

pub use contributors::{Contributor, compute_contributors};
pub use decode::{DecodeError, StoryDecoder, decode_count, decode_entries, decode_entry};
pub use entry::{StoryEntry, short_address, story_text};
pub use statistics::{Statistics, compute_statistics};
pub use streak::{calculate_streak, utc_day_key};
pub use validate::{MAX_WORD_LENGTH, ValidWord, WordError, validate_word};
