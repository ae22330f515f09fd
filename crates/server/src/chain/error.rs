// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub const PER_MINUTE_LIMIT_MESSAGE: &str =
    "API rate limit exceeded. Please wait a moment and try again.";
pub const TOO_MANY_REQUESTS_MESSAGE: &str = "Too many requests. Please wait a moment and try again.";

/// Failure talking to the contract, the node API or the wallet bridge.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited: {message}")]
    RateLimited { per_minute: bool, message: String },

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Contract call failed: {0}")]
    CallFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Wallet rejected the request: {0}")]
    Rejected(String),

    #[error("Wallet unavailable: {0}")]
    Unavailable(String),
}

fn mentions_per_minute_limit(text: &str) -> bool {
    let text = text.to_ascii_lowercase();
    text.contains("per-minute rate limit") || text.contains("rate limit exceeded")
}

fn mentions_too_many_requests(text: &str) -> bool {
    text.contains("429") || text.to_ascii_lowercase().contains("too many requests")
}

impl ChainError {
    /// Map a non-success HTTP status and its body.
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 429 {
            return ChainError::RateLimited {
                per_minute: mentions_per_minute_limit(&body),
                message: body,
            };
        }
        ChainError::HttpStatus { status, body }
    }

    /// Errors worth retrying: transport failures, rate limits and server errors.
    pub fn is_transient(&self) -> bool {
        match self {
            ChainError::Network(_) | ChainError::RateLimited { .. } => true,
            ChainError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_per_minute_limit(&self) -> bool {
        match self {
            ChainError::RateLimited { per_minute, .. } => *per_minute,
            other => mentions_per_minute_limit(&other.to_string()),
        }
    }

    fn is_too_many_requests(&self) -> bool {
        match self {
            ChainError::RateLimited { .. } => true,
            ChainError::HttpStatus { status, .. } => *status == 429,
            other => mentions_too_many_requests(&other.to_string()),
        }
    }

    /// Message suitable for showing to a user.
    pub fn user_message(&self) -> String {
        if self.is_per_minute_limit() {
            PER_MINUTE_LIMIT_MESSAGE.to_string()
        } else if self.is_too_many_requests() {
            TOO_MANY_REQUESTS_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<reqwest::Error> for ChainError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_body() {
            return ChainError::InvalidResponse(err.to_string());
        }
        ChainError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(
            ChainError::from_status(429, "Per-minute rate limit exceeded".to_string()),
            ChainError::RateLimited {
                per_minute: true,
                message: "Per-minute rate limit exceeded".to_string()
            }
        );
        assert!(matches!(
            ChainError::from_status(429, "slow down".to_string()),
            ChainError::RateLimited {
                per_minute: false,
                ..
            }
        ));
        assert!(matches!(
            ChainError::from_status(503, String::new()),
            ChainError::HttpStatus { status: 503, .. }
        ));
    }

    #[test]
    fn test_transient_classification() {
        assert!(ChainError::Network("reset".to_string()).is_transient());
        assert!(ChainError::from_status(429, String::new()).is_transient());
        assert!(ChainError::from_status(502, String::new()).is_transient());
        assert!(!ChainError::from_status(404, String::new()).is_transient());
        assert!(!ChainError::CallFailed("boom".to_string()).is_transient());
        assert!(!ChainError::InvalidResponse("bad".to_string()).is_transient());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ChainError::from_status(429, "rate limit exceeded".to_string()).user_message(),
            PER_MINUTE_LIMIT_MESSAGE
        );
        assert_eq!(
            ChainError::from_status(429, String::new()).user_message(),
            TOO_MANY_REQUESTS_MESSAGE
        );
        assert_eq!(
            ChainError::Network("Too Many Requests".to_string()).user_message(),
            TOO_MANY_REQUESTS_MESSAGE
        );
        assert_eq!(
            ChainError::CallFailed("Per-minute rate limit hit".to_string()).user_message(),
            PER_MINUTE_LIMIT_MESSAGE
        );
        assert_eq!(
            ChainError::CallFailed("(err u300)".to_string()).user_message(),
            "Contract call failed: (err u300)"
        );
    }
}
