// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod submit;

pub use submit::{SubmitError, SubmitWordRequest, SubmitWordResponse, submit_word};
