// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Mailquill backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Mailquill configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MailquillConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Text-generation backend settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Session token settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Text-generation backend configuration.
///
/// The decoding parameters are fixed per deployment; every generate call
/// sends the same bounded settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Transport: `"ollama"` (HTTP) or `"subprocess"`.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Base address of the Ollama service, e.g. `http://localhost:11434`.
    /// Required for the `ollama` backend; typically supplied via the
    /// `MAILQUILL_GENERATION_OLLAMA_URL` environment variable.
    #[serde(default)]
    pub ollama_url: Option<String>,

    /// Model identifier passed to the backend.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus sampling cutoff.
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Top-k sampling cutoff.
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Repetition penalty.
    #[serde(default = "default_repeat_penalty")]
    pub repeat_penalty: f64,

    /// Stop sequences that terminate generation.
    #[serde(default = "default_stop")]
    pub stop: Vec<String>,

    /// Command line for the `subprocess` backend. The prompt is written to
    /// the child's stdin; the generated text is read from its stdout.
    #[serde(default)]
    pub command: Option<String>,

    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            ollama_url: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            repeat_penalty: default_repeat_penalty(),
            stop: default_stop(),
            command: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_backend() -> String {
    "ollama".to_string()
}

fn default_model() -> String {
    "gemma:2b".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    0.9
}

fn default_top_k() -> u32 {
    40
}

fn default_repeat_penalty() -> f64 {
    1.1
}

fn default_stop() -> Vec<String> {
    vec!["</email>".to_string(), "---".to_string()]
}

fn default_timeout_secs() -> u64 {
    120
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("mailquill").join("mailquill.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("mailquill.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Session token configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Secret key for signing session tokens. `None` disables the
    /// authenticated routes; typically supplied via the
    /// `MAILQUILL_AUTH_TOKEN_SECRET` environment variable.
    #[serde(default)]
    pub token_secret: Option<String>,

    /// Session token lifetime in seconds.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

fn default_token_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}
