// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mailquill.toml` > `~/.config/mailquill/mailquill.toml`
//! > `/etc/mailquill/mailquill.toml` with environment variable overrides via
//! the `MAILQUILL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MailquillConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mailquill/mailquill.toml` (system-wide)
/// 3. `~/.config/mailquill/mailquill.toml` (user XDG config)
/// 4. `./mailquill.toml` (local directory)
/// 5. `MAILQUILL_*` environment variables
pub fn load_config() -> Result<MailquillConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MailquillConfig::default()))
        .merge(Toml::file("/etc/mailquill/mailquill.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("mailquill/mailquill.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("mailquill.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<MailquillConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MailquillConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MailquillConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MailquillConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `MAILQUILL_GENERATION_OLLAMA_URL` must
/// map to `generation.ollama_url`, not `generation.ollama.url`.
fn env_provider() -> Env {
    Env::prefixed("MAILQUILL_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: MAILQUILL_AUTH_TOKEN_SECRET -> "auth_token_secret"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("generation_", "generation.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("auth_", "auth.", 1);
        mapped.into()
    })
}
