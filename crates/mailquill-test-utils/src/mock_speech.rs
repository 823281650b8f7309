// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock speech capture for testing the dictation seam.
//!
//! Stands in for the host environment's recognizer: a capture session plays
//! back scripted partial transcripts, and core logic only ever sees the
//! resulting plain text.

use std::collections::HashSet;
use std::sync::Mutex;

use mailquill_core::{CaptureHandle, MailquillError, SpeechCapture};

/// Speech capture stub that delivers scripted transcripts synchronously.
pub struct MockSpeechCapture {
    transcripts: Vec<String>,
    next_handle: Mutex<u64>,
    open: Mutex<HashSet<u64>>,
}

impl MockSpeechCapture {
    /// Each `start_capture` call delivers all scripted transcripts in order.
    pub fn scripted(transcripts: Vec<String>) -> Self {
        Self {
            transcripts,
            next_handle: Mutex::new(0),
            open: Mutex::new(HashSet::new()),
        }
    }

    /// Whether a capture session is still open.
    pub fn is_open(&self, handle: CaptureHandle) -> bool {
        self.open.lock().unwrap().contains(&handle.0)
    }
}

impl SpeechCapture for MockSpeechCapture {
    fn start_capture(
        &self,
        mut on_text: Box<dyn FnMut(&str) + Send>,
    ) -> Result<CaptureHandle, MailquillError> {
        let handle = {
            let mut next = self.next_handle.lock().unwrap();
            *next += 1;
            CaptureHandle(*next)
        };
        self.open.lock().unwrap().insert(handle.0);
        for transcript in &self.transcripts {
            on_text(transcript);
        }
        Ok(handle)
    }

    fn stop(&self, handle: CaptureHandle) -> Result<(), MailquillError> {
        if !self.open.lock().unwrap().remove(&handle.0) {
            return Err(MailquillError::not_found(format!(
                "capture session {}",
                handle.0
            )));
        }
        Ok(())
    }
}
