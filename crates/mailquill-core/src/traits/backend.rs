// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation backend trait for text-generation transports.

use async_trait::async_trait;

use crate::error::MailquillError;
use crate::types::HealthStatus;

/// A text-generation backend.
///
/// One outbound network/process call per [`generate`](Self::generate)
/// invocation; implementations never retry. Backend timeouts, non-success
/// statuses, and malformed responses all surface as
/// [`MailquillError::Generation`] with a distinguishing message.
///
/// The full response is awaited before returning; there is no streaming.
#[async_trait]
pub trait GenerationBackend: Send + Sync + 'static {
    /// Human-readable backend name for logs and health output.
    fn name(&self) -> &str;

    /// Sends a prompt and returns the full generated text.
    async fn generate(&self, prompt: &str) -> Result<String, MailquillError>;

    /// Forwards a raw request body to the backend's generate endpoint and
    /// returns the backend's JSON verbatim.
    ///
    /// Only meaningful for HTTP transports; the default rejects the call.
    async fn forward_raw(
        &self,
        _body: serde_json::Value,
    ) -> Result<serde_json::Value, MailquillError> {
        Err(MailquillError::generation(format!(
            "backend '{}' does not support raw passthrough",
            self.name()
        )))
    }

    /// Probes the backend and reports its status.
    async fn health_check(&self) -> Result<HealthStatus, MailquillError>;
}
