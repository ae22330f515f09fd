// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;

use serde::Serialize;

use super::entry::StoryEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub address: String,
    pub count: u64,
    /// Earliest timestamp among the contributor's entries.
    pub first_contribution: u64,
}

/// Group entries by sender, most prolific first.
///
/// Ties keep the order in which senders first appear in `entries`.
pub fn compute_contributors(entries: &[StoryEntry]) -> Vec<Contributor> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut contributors: Vec<Contributor> = Vec::new();

    for entry in entries {
        match index.get(entry.sender.as_str()) {
            Some(&position) => {
                let contributor = &mut contributors[position];
                contributor.count += 1;
                contributor.first_contribution = contributor.first_contribution.min(entry.timestamp);
            }
            None => {
                index.insert(&entry.sender, contributors.len());
                contributors.push(Contributor {
                    address: entry.sender.clone(),
                    count: 1,
                    first_contribution: entry.timestamp,
                });
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts.
    contributors.sort_by(|a, b| b.count.cmp(&a.count));
    contributors
}
