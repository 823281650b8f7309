// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generation backend for deterministic testing.
//!
//! `MockBackend` implements `GenerationBackend` with pre-configured results,
//! enabling fast, CI-runnable tests without a model server.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use mailquill_core::{GenerationBackend, HealthStatus, MailquillError};

/// A mock backend that pops results from a FIFO queue.
///
/// When the queue is empty, a default `"mock reply"` text is returned.
/// Every prompt seen is recorded for assertions.
pub struct MockBackend {
    results: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockBackend {
    /// Create a mock backend with an empty result queue.
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock backend pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<String>) -> Self {
        let backend = Self::new();
        for reply in replies {
            backend.push_reply(reply);
        }
        backend
    }

    /// Queue a successful reply.
    pub fn push_reply(&self, text: impl Into<String>) {
        self.results.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a generation failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.results.lock().unwrap().push_back(Err(message.into()));
    }

    /// Every prompt the backend has been asked to generate from, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, MailquillError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.results.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(MailquillError::generation(message)),
            None => Ok("mock reply".to_string()),
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, MailquillError> {
        Ok(HealthStatus::Healthy)
    }
}
