// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `mailquill-core::types` for use across
//! the store trait boundary. This module re-exports them for convenience
//! within the storage crate.

pub use mailquill_core::types::{ActionKind, Chat, ChatId, Message, Role, Tone, User};
