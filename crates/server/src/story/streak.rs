// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate};

use super::entry::StoryEntry;

/// UTC calendar day of a Unix timestamp.
pub fn utc_day(timestamp: u64) -> Option<NaiveDate> {
    let secs = i64::try_from(timestamp).ok()?;
    DateTime::from_timestamp(secs, 0).map(|at| at.date_naive())
}

/// `YYYY-MM-DD` key of the UTC day containing `timestamp`.
pub fn utc_day_key(timestamp: u64) -> Option<String> {
    utc_day(timestamp).map(|day| day.format("%Y-%m-%d").to_string())
}

/// Number of consecutive UTC days, ending at the user's most recent active
/// day, on which the user contributed at least one word.
///
/// The streak is anchored at the last active day rather than today, so a
/// streak does not reset until the user contributes again.
pub fn calculate_streak(entries: &[StoryEntry], user: Option<&str>) -> u32 {
    let Some(user) = user.map(str::trim).filter(|user| !user.is_empty()) else {
        return 0;
    };

    let days: BTreeSet<NaiveDate> = entries
        .iter()
        .filter(|entry| entry.sender == user)
        .filter_map(|entry| utc_day(entry.timestamp))
        .collect();

    let Some(mut day) = days.last().copied() else {
        return 0;
    };

    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}
