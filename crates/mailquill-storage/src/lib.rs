// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence layer for Mailquill conversations and accounts.
//!
//! Provides WAL-mode SQLite storage with embedded migrations and a
//! single-writer concurrency model via `tokio-rusqlite`, plus an in-memory
//! store with the identical contract for ephemeral scopes and tests.

pub mod database;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod sqlite;

pub use database::Database;
pub use memory::MemoryChatStore;
pub use sqlite::SqliteChatStore;
