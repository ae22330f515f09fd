// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contract, node API and wallet collaborators.

pub mod error;
pub mod memory;
pub mod reader;
pub mod retry;
pub mod wallet;
pub mod writer;

pub use error::ChainError;
pub use memory::InMemoryContract;
pub use reader::{ContractReader, HiroReadClient, ReadOnlyCall};
pub use retry::RetryPolicy;
pub use wallet::{NoWallet, Wallet, WalletBridge};
pub use writer::{ContractCall, ContractWriter, TxSubmission};
