// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language/tone catalog and prompt construction for Mailquill.
//!
//! Pure data and pure functions: no I/O, no clock, no randomness. The
//! catalog is a fixed table compiled into the binary; the builder maps a
//! request tuple into a single deterministic instruction string.

pub mod builder;
pub mod catalog;
pub mod tone;

pub use builder::build_prompt;
pub use catalog::{lookup, Honorifics, LanguageProfile};
