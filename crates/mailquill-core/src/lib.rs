// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mailquill email assistant.
//!
//! This crate provides the foundational trait definitions, error type, and
//! common types used throughout the Mailquill workspace. The generation
//! backends and chat stores implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MailquillError;
pub use types::{ActionKind, Chat, ChatId, ChatPatch, HealthStatus, Message, Role, Tone, User};

pub use traits::{CaptureHandle, ChatStore, GenerationBackend, SpeechCapture, UserStore};
