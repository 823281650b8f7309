// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-supplied speech capture capability.

use crate::error::MailquillError;

/// Opaque handle identifying an in-progress capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureHandle(pub u64);

/// Voice dictation capability supplied by the host environment (a browser
/// speech API, a native recognizer).
///
/// Core logic never touches the capture mechanism itself -- it only consumes
/// the plain text a capture session yields.
pub trait SpeechCapture: Send + Sync {
    /// Begins a capture session. Partial transcripts are delivered to
    /// `on_text` as they become available.
    fn start_capture(
        &self,
        on_text: Box<dyn FnMut(&str) + Send>,
    ) -> Result<CaptureHandle, MailquillError>;

    /// Ends the capture session identified by `handle`.
    fn stop(&self, handle: CaptureHandle) -> Result<(), MailquillError>;
}
