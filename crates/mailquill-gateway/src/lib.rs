// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Mailquill email assistant.
//!
//! Exposes the email-assistant surface over axum: the legacy generate
//! passthrough, the email action route, credential auth, and the
//! session-guarded chat CRUD routes.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::{AuthKeys, Identity};
pub use server::{build_router, start_server, AppState};
