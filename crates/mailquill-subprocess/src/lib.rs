// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subprocess generation backend.
//!
//! Runs the configured command once per generate call: the prompt is written
//! to the child's stdin, the generated text is read from its stdout. A
//! non-zero exit surfaces trimmed stderr as the error message. One process
//! per invocation, no retries -- the same contract as the HTTP transport.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use mailquill_config::model::GenerationConfig;
use mailquill_core::{GenerationBackend, HealthStatus, MailquillError};

/// Generation backend that pipes prompts through a child process.
///
/// The command string is split on whitespace into program + arguments; shell
/// quoting is not interpreted. Point it at a wrapper script when the model
/// runner needs a more involved invocation.
#[derive(Debug, Clone)]
pub struct SubprocessBackend {
    argv: Vec<String>,
    timeout: Duration,
}

impl SubprocessBackend {
    /// Creates a backend from configuration. A missing `generation.command`
    /// is a fatal configuration error.
    pub fn new(config: &GenerationConfig) -> Result<Self, MailquillError> {
        let argv: Vec<String> = config
            .command
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if argv.is_empty() {
            return Err(MailquillError::Config(
                "generation.command is not set for the subprocess backend".to_string(),
            ));
        }
        Ok(Self {
            argv,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

#[async_trait]
impl GenerationBackend for SubprocessBackend {
    fn name(&self) -> &str {
        "subprocess"
    }

    async fn generate(&self, prompt: &str) -> Result<String, MailquillError> {
        let mut child = tokio::process::Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MailquillError::Generation {
                message: format!("failed to spawn `{}`: {e}", self.argv[0]),
                source: Some(Box::new(e)),
            })?;

        // stdin must close so the child sees EOF after the prompt.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .await
                .map_err(|e| MailquillError::Generation {
                    message: format!("failed to write prompt to `{}`: {e}", self.argv[0]),
                    source: Some(Box::new(e)),
                })?;
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                MailquillError::generation(format!(
                    "`{}` timed out after {:?}",
                    self.argv[0], self.timeout
                ))
            })?
            .map_err(|e| MailquillError::Generation {
                message: format!("failed to read output of `{}`: {e}", self.argv[0]),
                source: Some(Box::new(e)),
            })?;

        debug!(status = ?output.status, "subprocess finished");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(MailquillError::generation(format!(
                "`{}` exited with code {exit_code}: {}",
                self.argv[0],
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn health_check(&self) -> Result<HealthStatus, MailquillError> {
        // A process is spawned per call; the only cheap probe is whether the
        // program resolves at all.
        let program = &self.argv[0];
        let found = if program.contains('/') {
            std::path::Path::new(program).exists()
        } else {
            std::env::var_os("PATH").is_some_and(|paths| {
                std::env::split_paths(&paths).any(|dir| dir.join(program).exists())
            })
        };
        if found {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy(format!("`{program}` not found")))
        }
    }
}
