// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mailquill serve` command implementation.
//!
//! Starts the gateway with the configured generation backend and SQLite
//! chat storage.

use std::sync::Arc;

use tracing::{error, info, warn};

use mailquill_config::MailquillConfig;
use mailquill_core::{ChatStore, GenerationBackend, MailquillError, UserStore};
use mailquill_gateway::{start_server, AppState, AuthKeys};
use mailquill_ollama::OllamaBackend;
use mailquill_storage::SqliteChatStore;
use mailquill_subprocess::SubprocessBackend;

/// Runs the `mailquill serve` command.
pub async fn run_serve(config: MailquillConfig) -> Result<(), MailquillError> {
    init_tracing(&config.server.log_level);
    info!("starting mailquill serve");

    // Storage first; everything else hangs off it.
    let store = Arc::new(SqliteChatStore::new(config.storage.clone()));
    store.initialize().await?;

    // Generation backend per configured transport.
    let backend: Arc<dyn GenerationBackend> = match config.generation.backend.as_str() {
        "subprocess" => Arc::new(SubprocessBackend::new(&config.generation)?),
        _ => {
            let backend = OllamaBackend::new(&config.generation).map_err(|e| {
                error!(error = %e, "failed to initialize Ollama backend");
                eprintln!(
                    "error: generation backend address required. \
                     Set MAILQUILL_GENERATION_OLLAMA_URL or generation.ollama_url in mailquill.toml"
                );
                e
            })?;
            Arc::new(backend)
        }
    };
    info!(backend = backend.name(), model = %config.generation.model, "generation backend ready");

    if config.auth.token_secret.is_none() {
        warn!("auth.token_secret is not set -- /api/chats routes will reject all requests");
    }
    let auth = AuthKeys::new(config.auth.token_secret.clone(), config.auth.token_ttl_secs);

    let chat_store: Arc<dyn ChatStore> = store.clone();
    let user_store: Arc<dyn UserStore> = store.clone();
    let state = AppState::new(chat_store, user_store, backend, auth);

    let result = start_server(&config.server.host, config.server.port, state).await;
    if let Err(e) = &result {
        error!(error = %e, "gateway exited with error");
    }

    // Checkpoint the WAL on the way out.
    store.close().await?;
    result
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
