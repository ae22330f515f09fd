// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::entry::StoryEntry;
use super::streak::utc_day;

const WEEK_SECS: u64 = 7 * 86_400;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_words: usize,
    pub total_contributors: usize,
    pub average_words_per_contributor: f64,
    pub words_today: usize,
    pub words_this_week: usize,
    pub category_distribution: BTreeMap<String, usize>,
}

/// Aggregate statistics as of `now` (Unix seconds).
pub fn compute_statistics(entries: &[StoryEntry], now: u64, default_category: &str) -> Statistics {
    let contributors: HashSet<&str> = entries.iter().map(|entry| entry.sender.as_str()).collect();
    let today = utc_day(now);
    let week_start = now.saturating_sub(WEEK_SECS);

    let mut category_distribution = BTreeMap::new();
    for entry in entries {
        let label = match entry.category.trim() {
            "" => default_category,
            label => label,
        };
        *category_distribution.entry(label.to_string()).or_insert(0) += 1;
    }

    let average_words_per_contributor = if contributors.is_empty() {
        0.0
    } else {
        entries.len() as f64 / contributors.len() as f64
    };

    Statistics {
        total_words: entries.len(),
        total_contributors: contributors.len(),
        average_words_per_contributor,
        words_today: entries
            .iter()
            .filter(|entry| today.is_some() && utc_day(entry.timestamp) == today)
            .count(),
        words_this_week: entries
            .iter()
            .filter(|entry| entry.timestamp >= week_start)
            .count(),
        category_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-10T12:00:00Z
    const NOW: u64 = 1_710_072_000;

    fn entry(sender: &str, timestamp: u64, category: &str) -> StoryEntry {
        StoryEntry {
            id: 0,
            word: "w".to_string(),
            sender: sender.to_string(),
            timestamp,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_empty_story() {
        let stats = compute_statistics(&[], NOW, "general");
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.total_contributors, 0);
        assert_eq!(stats.average_words_per_contributor, 0.0);
        assert!(stats.category_distribution.is_empty());
    }

    #[test]
    fn test_counts_and_distribution() {
        let entries = vec![
            entry("A", NOW - 60, "fable"),
            entry("A", NOW - 13 * 3600, "fable"),
            entry("B", NOW - 3 * 86_400, ""),
            entry("C", NOW - 30 * 86_400, "poem"),
        ];
        let stats = compute_statistics(&entries, NOW, "general");

        assert_eq!(stats.total_words, 4);
        assert_eq!(stats.total_contributors, 3);
        assert!((stats.average_words_per_contributor - 4.0 / 3.0).abs() < f64::EPSILON);
        // NOW - 13h is the previous UTC day.
        assert_eq!(stats.words_today, 1);
        assert_eq!(stats.words_this_week, 3);
        assert_eq!(stats.category_distribution.get("fable"), Some(&2));
        assert_eq!(stats.category_distribution.get("general"), Some(&1));
        assert_eq!(stats.category_distribution.get("poem"), Some(&1));
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(compute_statistics(&[], NOW, "general")).unwrap();
        for key in [
            "totalWords",
            "totalContributors",
            "averageWordsPerContributor",
            "wordsToday",
            "wordsThisWeek",
            "categoryDistribution",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }
}
