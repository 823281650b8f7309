// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ChatStore and UserStore traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use mailquill_config::model::StorageConfig;
use mailquill_core::types::{ActionKind, Chat, ChatId, ChatPatch, HealthStatus, Message, Role, Tone, User};
use mailquill_core::{ChatStore, MailquillError, UserStore};

use crate::database::Database;
use crate::queries;

/// SQLite-backed chat store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened on the first call to
/// [`initialize`](Self::initialize).
pub struct SqliteChatStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteChatStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Opens the database, running pending migrations.
    pub async fn initialize(&self) -> Result<(), MailquillError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| MailquillError::Persistence {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite chat store initialized");
        Ok(())
    }

    /// Checkpoints and releases the connection's WAL ahead of shutdown.
    pub async fn close(&self) -> Result<(), MailquillError> {
        self.db()?.close().await
    }

    /// Probes the database with a trivial query.
    pub async fn health_check(&self) -> Result<HealthStatus, MailquillError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    fn db(&self) -> Result<&Database, MailquillError> {
        self.db.get().ok_or_else(|| MailquillError::Persistence {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

#[async_trait]
impl ChatStore for SqliteChatStore {
    async fn create_chat(
        &self,
        owner: &str,
        title: &str,
        kind: ActionKind,
    ) -> Result<Chat, MailquillError> {
        let now = Self::now();
        let chat = Chat {
            id: ChatId(uuid::Uuid::new_v4().to_string()),
            title: title.to_string(),
            kind,
            tone: Tone::default(),
            language: "en".to_string(),
            messages: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        };
        queries::chats::insert_chat(self.db()?, owner, &chat).await?;
        debug!(chat_id = %chat.id, %kind, "chat created");
        Ok(chat)
    }

    async fn list_chats(
        &self,
        owner: &str,
        kind: ActionKind,
    ) -> Result<Vec<Chat>, MailquillError> {
        queries::chats::list_chats(self.db()?, owner, kind).await
    }

    async fn get_chat(&self, owner: &str, id: &ChatId) -> Result<Chat, MailquillError> {
        queries::chats::get_chat(self.db()?, owner, id)
            .await?
            .ok_or_else(|| MailquillError::not_found(format!("chat {id}")))
    }

    async fn patch_chat(
        &self,
        owner: &str,
        id: &ChatId,
        patch: ChatPatch,
    ) -> Result<Chat, MailquillError> {
        queries::chats::patch_chat(
            self.db()?,
            owner,
            id,
            patch.tone.map(|t| t.to_string()),
            patch.language,
            &Self::now(),
        )
        .await?
        .ok_or_else(|| MailquillError::not_found(format!("chat {id}")))
    }

    async fn append_message(
        &self,
        owner: &str,
        id: &ChatId,
        role: Role,
        content: &str,
    ) -> Result<Chat, MailquillError> {
        let message = Message {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.to_string(),
            created_at: Self::now(),
        };
        queries::messages::append_message(self.db()?, owner, id, &message)
            .await?
            .ok_or_else(|| MailquillError::not_found(format!("chat {id}")))
    }

    async fn delete_chat(&self, owner: &str, id: &ChatId) -> Result<(), MailquillError> {
        if !queries::chats::delete_chat(self.db()?, owner, id).await? {
            return Err(MailquillError::not_found(format!("chat {id}")));
        }
        debug!(chat_id = %id, "chat deleted");
        Ok(())
    }

    async fn active_chat(
        &self,
        owner: &str,
        kind: ActionKind,
    ) -> Result<Option<ChatId>, MailquillError> {
        queries::chats::get_active(self.db()?, owner, kind).await
    }

    async fn select_chat(&self, owner: &str, id: &ChatId) -> Result<(), MailquillError> {
        if !queries::chats::set_active(self.db()?, owner, id).await? {
            return Err(MailquillError::not_found(format!("chat {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteChatStore {
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<User, MailquillError> {
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Self::now(),
        };
        if !queries::users::insert_user(self.db()?, &user).await? {
            return Err(MailquillError::Validation(format!(
                "email {email} is already registered"
            )));
        }
        Ok(user)
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, MailquillError> {
        queries::users::find_user(self.db()?, email).await
    }
}
