// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// One contributed word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryEntry {
    /// Assigned by the contract in submission order.
    pub id: u64,
    pub word: String,
    /// Wallet address of the contributor; an opaque key.
    pub sender: String,
    /// Seconds since the Unix epoch. `0` is the contract's "unset" value.
    pub timestamp: u64,
    pub category: String,
}

/// Concatenate the words in order, separated by single spaces.
pub fn story_text(entries: &[StoryEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display form of an address: first six and last four characters.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, word: &str) -> StoryEntry {
        StoryEntry {
            id,
            word: word.to_string(),
            sender: "ST1SENDER".to_string(),
            timestamp: 0,
            category: "general".to_string(),
        }
    }

    #[test]
    fn test_story_text() {
        assert_eq!(story_text(&[]), "");
        assert_eq!(
            story_text(&[entry(0, "once"), entry(1, "upon"), entry(2, "a")]),
            "once upon a"
        );
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"),
            "ST1PQH...GZGM"
        );
        assert_eq!(short_address("SHORT"), "SHORT");
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let json = serde_json::to_value(entry(7, "hi")).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["word"], "hi");
        assert_eq!(json["timestamp"], 0);
    }
}
