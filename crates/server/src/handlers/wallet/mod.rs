// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wallet session handlers.
//!
//! The service keeps a single session: the primary address of the last
//! successful connect, used to attribute submissions and the own-streak view.

mod session;

pub use session::{WalletError, WalletStatus, connect, disconnect, get_wallet};
