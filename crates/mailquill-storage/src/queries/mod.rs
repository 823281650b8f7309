// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. All functions accept `&Database` and route through
//! the single background writer thread.

pub mod chats;
pub mod messages;
pub mod users;
