// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama HTTP generation backend for Mailquill.

pub mod client;

pub use client::OllamaBackend;
