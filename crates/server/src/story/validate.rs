// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

/// Upper bound of the contract's `string-ascii` word argument.
pub const MAX_WORD_LENGTH: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordError {
    #[error("Word must not be empty")]
    Empty,

    #[error("Word must be at most {MAX_WORD_LENGTH} characters, got {0}")]
    TooLong(usize),

    #[error("Word must contain ASCII characters only")]
    NotAscii,

    #[error("Category must contain ASCII characters only")]
    CategoryNotAscii,
}

/// A word ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidWord {
    pub word: String,
    pub category: String,
}

/// Trim and check a submission; an absent or blank category becomes `default_category`.
pub fn validate_word(
    word: &str,
    category: Option<&str>,
    default_category: &str,
) -> Result<ValidWord, WordError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(WordError::Empty);
    }
    if !word.is_ascii() {
        return Err(WordError::NotAscii);
    }
    if word.len() > MAX_WORD_LENGTH {
        return Err(WordError::TooLong(word.len()));
    }

    let category = match category.map(str::trim) {
        Some(category) if !category.is_empty() => category,
        _ => default_category,
    };
    if !category.is_ascii() {
        return Err(WordError::CategoryNotAscii);
    }

    Ok(ValidWord {
        word: word.to_string(),
        category: category.to_string(),
    })
}
