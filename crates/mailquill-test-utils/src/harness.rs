// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete stack with a mock backend, a temp
//! SQLite chat store, and a dispatcher. Provides `send()` to drive a full
//! turn in tests.

use std::sync::Arc;

use mailquill_config::model::StorageConfig;
use mailquill_core::{ActionKind, ChatStore, MailquillError};
use mailquill_dispatch::{Dispatcher, TurnOutcome, TurnRequest};
use mailquill_storage::SqliteChatStore;

use crate::mock_backend::MockBackend;

/// Owner id the harness dispatches turns under.
pub const TEST_OWNER: &str = "test-user";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
        }
    }

    /// Queue mock backend replies.
    pub fn with_replies(mut self, replies: Vec<String>) -> Self {
        self.replies = replies;
        self
    }

    /// Build the harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, MailquillError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| MailquillError::Persistence {
            source: e.into(),
        })?;
        let db_path = temp_dir.path().join("test.db");

        let store = Arc::new(SqliteChatStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        }));
        store.initialize().await?;

        let backend = Arc::new(MockBackend::with_replies(self.replies));
        let dispatcher = Dispatcher::new(store.clone(), backend.clone());

        Ok(TestHarness {
            backend,
            store,
            dispatcher,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock backend and temp storage.
pub struct TestHarness {
    /// The mock generation backend.
    pub backend: Arc<MockBackend>,
    /// SQLite chat store (temp DB, cleaned up on drop).
    pub store: Arc<SqliteChatStore>,
    /// Dispatcher wired to the mock backend and temp store.
    pub dispatcher: Dispatcher,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Dispatch a minimal turn: just an action and input text.
    pub async fn send(
        &self,
        action: ActionKind,
        text: &str,
    ) -> Result<TurnOutcome, MailquillError> {
        self.send_request(TurnRequest {
            action,
            text: text.to_string(),
            tone: None,
            language: None,
            previous_email: None,
            chat_id: None,
        })
        .await
    }

    /// Dispatch a fully specified turn.
    pub async fn send_request(
        &self,
        request: TurnRequest,
    ) -> Result<TurnOutcome, MailquillError> {
        self.dispatcher.dispatch(TEST_OWNER, request).await
    }

    /// The chat store as a trait object, for contract-level assertions.
    pub fn chat_store(&self) -> Arc<dyn ChatStore> {
        self.store.clone()
    }
}
