// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, known backend names, and
//! sampling parameter ranges.

use crate::diagnostic::ConfigError;
use crate::model::MailquillConfig;

/// Known generation transports.
const KNOWN_BACKENDS: &[&str] = &["ollama", "subprocess"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MailquillConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate server.host is a plausible IP or hostname.
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate the generation transport is one we know.
    if !KNOWN_BACKENDS.contains(&config.generation.backend.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "generation.backend `{}` is not supported (expected one of: {})",
                config.generation.backend,
                KNOWN_BACKENDS.join(", ")
            ),
        });
    }

    // The subprocess transport needs a command to run.
    if config.generation.backend == "subprocess"
        && config
            .generation
            .command
            .as_deref()
            .is_none_or(|c| c.trim().is_empty())
    {
        errors.push(ConfigError::Validation {
            message: "generation.command is required when generation.backend = \"subprocess\""
                .to_string(),
        });
    }

    // If an Ollama address is configured it must be an http(s) URL. A missing
    // address is not a validation error here -- it becomes a fatal
    // configuration error the moment a generation-dependent request needs it.
    if let Some(url) = config.generation.ollama_url.as_deref()
        && !url.trim().is_empty()
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        errors.push(ConfigError::Validation {
            message: format!("generation.ollama_url `{url}` must start with http:// or https://"),
        });
    }

    // Sampling parameter ranges.
    if config.generation.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "generation.max_tokens must be at least 1".to_string(),
        });
    }
    if !(0.0..=2.0).contains(&config.generation.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "generation.temperature must be within 0.0..=2.0, got {}",
                config.generation.temperature
            ),
        });
    }
    if !(0.0..=1.0).contains(&config.generation.top_p) {
        errors.push(ConfigError::Validation {
            message: format!(
                "generation.top_p must be within 0.0..=1.0, got {}",
                config.generation.top_p
            ),
        });
    }
    if config.generation.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "generation.timeout_secs must be at least 1".to_string(),
        });
    }

    // Validate database_path is not empty.
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // A configured token secret must not be trivially short.
    if let Some(secret) = config.auth.token_secret.as_deref()
        && secret.len() < 16
    {
        errors.push(ConfigError::Validation {
            message: "auth.token_secret must be at least 16 bytes".to_string(),
        });
    }

    if config.auth.token_ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "auth.token_ttl_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = MailquillConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = MailquillConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn unknown_backend_fails_validation() {
        let mut config = MailquillConfig::default();
        config.generation.backend = "carrier-pigeon".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("generation.backend"))
        ));
    }

    #[test]
    fn subprocess_backend_requires_command() {
        let mut config = MailquillConfig::default();
        config.generation.backend = "subprocess".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("generation.command"))
        ));

        config.generation.command = Some("python3 model_runner.py".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn non_http_ollama_url_fails_validation() {
        let mut config = MailquillConfig::default();
        config.generation.ollama_url = Some("localhost:11434".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("ollama_url"))
        ));
    }

    #[test]
    fn missing_ollama_url_passes_validation() {
        // Absence only becomes fatal when a generation request needs it.
        let config = MailquillConfig::default();
        assert!(config.generation.ollama_url.is_none());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn out_of_range_sampling_params_fail_validation() {
        let mut config = MailquillConfig::default();
        config.generation.temperature = 3.5;
        config.generation.top_p = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn short_token_secret_fails_validation() {
        let mut config = MailquillConfig::default();
        config.auth.token_secret = Some("short".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("token_secret"))
        ));
    }
}
