// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Mailquill seams.
//!
//! The generation transport and the chat persistence backend are both
//! pluggable; traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod backend;
pub mod speech;
pub mod store;

pub use backend::GenerationBackend;
pub use speech::{CaptureHandle, SpeechCapture};
pub use store::{ChatStore, UserStore};
