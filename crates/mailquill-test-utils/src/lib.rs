// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock adapters and an end-to-end harness for Mailquill tests.

pub mod harness;
pub mod mock_backend;
pub mod mock_speech;

pub use harness::{TestHarness, TestHarnessBuilder, TEST_OWNER};
pub use mock_backend::MockBackend;
pub use mock_speech::MockSpeechCapture;
