// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Mailquill email assistant.

use thiserror::Error;

/// The primary error type used across all Mailquill components.
#[derive(Debug, Error)]
pub enum MailquillError {
    /// Configuration errors (missing backend address, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Request validation failures. User-correctable; detected before any
    /// external call is made.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced chat, message, or user is absent or not owned by the caller.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Generation backend failures (unreachable, non-success status,
    /// malformed response).
    #[error("generation error: {message}")]
    Generation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage read/write failures.
    #[error("persistence error: {source}")]
    Persistence {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Missing or invalid session credentials.
    #[error("auth error: {0}")]
    Auth(String),

    /// Internal or unexpected errors (bind failures, task panics).
    #[error("internal error: {0}")]
    Internal(String),
}

impl MailquillError {
    /// Shorthand for a [`MailquillError::Generation`] without an underlying cause.
    pub fn generation(message: impl Into<String>) -> Self {
        MailquillError::Generation {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a [`MailquillError::NotFound`].
    pub fn not_found(resource: impl Into<String>) -> Self {
        MailquillError::NotFound {
            resource: resource.into(),
        }
    }
}
