// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clarity value codec used to talk to the story contract.
//!
//! Read-only call results arrive as hex-encoded, consensus-serialized Clarity
//! values. They are decoded into [`ClarityValue`] and rendered into the
//! loosely typed JSON object form consumed by [`crate::story::decode`].

pub mod c32;
pub mod value;

pub use c32::c32_address;
pub use value::{ClarityError, ClarityValue};
