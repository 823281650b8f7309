// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory implementation of the ChatStore and UserStore traits.
//!
//! Same contract as the SQLite store, nothing outlives the process. Backs
//! unauthenticated one-shot turns and tests; callers must not assume which
//! store they are talking to.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use mailquill_core::types::{ActionKind, Chat, ChatId, ChatPatch, Message, Role, Tone, User};
use mailquill_core::{ChatStore, MailquillError, UserStore};

struct StoredChat {
    owner: String,
    /// Monotonic creation counter; orders "most recent" deterministically.
    seq: u64,
    chat: Chat,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    chats: HashMap<String, StoredChat>,
    active: HashMap<(String, ActionKind), ChatId>,
    users: HashMap<String, User>,
}

/// Ephemeral chat store.
#[derive(Default)]
pub struct MemoryChatStore {
    inner: RwLock<Inner>,
}

impl MemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

#[async_trait]
impl ChatStore for MemoryChatStore {
    async fn create_chat(
        &self,
        owner: &str,
        title: &str,
        kind: ActionKind,
    ) -> Result<Chat, MailquillError> {
        let mut inner = self.inner.write().await;
        inner.next_seq += 1;
        let seq = inner.next_seq;

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
        inner.chats.insert(
            chat.id.0.clone(),
            StoredChat {
                owner: owner.to_string(),
                seq,
                chat: chat.clone(),
            },
        );
        inner
            .active
            .insert((owner.to_string(), kind), chat.id.clone());
        Ok(chat)
    }

    async fn list_chats(
        &self,
        owner: &str,
        kind: ActionKind,
    ) -> Result<Vec<Chat>, MailquillError> {
        let inner = self.inner.read().await;
        let mut stored: Vec<&StoredChat> = inner
            .chats
            .values()
            .filter(|s| s.owner == owner && s.chat.kind == kind)
            .collect();
        stored.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(stored.into_iter().map(|s| s.chat.clone()).collect())
    }

    async fn get_chat(&self, owner: &str, id: &ChatId) -> Result<Chat, MailquillError> {
        let inner = self.inner.read().await;
        inner
            .chats
            .get(&id.0)
            .filter(|s| s.owner == owner)
            .map(|s| s.chat.clone())
            .ok_or_else(|| MailquillError::not_found(format!("chat {id}")))
    }

    async fn patch_chat(
        &self,
        owner: &str,
        id: &ChatId,
        patch: ChatPatch,
    ) -> Result<Chat, MailquillError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .chats
            .get_mut(&id.0)
            .filter(|s| s.owner == owner)
            .ok_or_else(|| MailquillError::not_found(format!("chat {id}")))?;
        if let Some(tone) = patch.tone {
            stored.chat.tone = tone;
        }
        if let Some(language) = patch.language {
            stored.chat.language = language;
        }
        stored.chat.updated_at = Self::now();
        Ok(stored.chat.clone())
    }

    async fn append_message(
        &self,
        owner: &str,
        id: &ChatId,
        role: Role,
        content: &str,
    ) -> Result<Chat, MailquillError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .chats
            .get_mut(&id.0)
            .filter(|s| s.owner == owner)
            .ok_or_else(|| MailquillError::not_found(format!("chat {id}")))?;
        let now = Self::now();
        stored.chat.messages.push(Message {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.to_string(),
            created_at: now.clone(),
        });
        stored.chat.updated_at = now;
        Ok(stored.chat.clone())
    }

    async fn delete_chat(&self, owner: &str, id: &ChatId) -> Result<(), MailquillError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .chats
            .get(&id.0)
            .filter(|s| s.owner == owner)
            .ok_or_else(|| MailquillError::not_found(format!("chat {id}")))?;
        let kind = stored.chat.kind;
        inner.chats.remove(&id.0);

        let scope = (owner.to_string(), kind);
        if inner.active.get(&scope) == Some(id) {
            let replacement = inner
                .chats
                .values()
                .filter(|s| s.owner == owner && s.chat.kind == kind)
                .max_by_key(|s| s.seq)
                .map(|s| s.chat.id.clone());
            match replacement {
                Some(next) => {
                    inner.active.insert(scope, next);
                }
                None => {
                    inner.active.remove(&scope);
                }
            }
        }
        Ok(())
    }

    async fn active_chat(
        &self,
        owner: &str,
        kind: ActionKind,
    ) -> Result<Option<ChatId>, MailquillError> {
        let inner = self.inner.read().await;
        Ok(inner.active.get(&(owner.to_string(), kind)).cloned())
    }

    async fn select_chat(&self, owner: &str, id: &ChatId) -> Result<(), MailquillError> {
        let mut inner = self.inner.write().await;
        let kind = inner
            .chats
            .get(&id.0)
            .filter(|s| s.owner == owner)
            .map(|s| s.chat.kind)
            .ok_or_else(|| MailquillError::not_found(format!("chat {id}")))?;
        inner.active.insert((owner.to_string(), kind), id.clone());
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryChatStore {
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<User, MailquillError> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(email) {
            return Err(MailquillError::Validation(format!(
                "email {email} is already registered"
            )));
        }
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Self::now(),
        };
        inner.users.insert(email.to_string(), user.clone());
        Ok(user)
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, MailquillError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_get_roundtrips() {
        let store = MemoryChatStore::new();
        let chat = store.create_chat("u1", "Quarterly ask", ActionKind::Write).await.unwrap();
        let fetched = store.get_chat("u1", &chat.id).await.unwrap();
        assert_eq!(fetched.title, "Quarterly ask");
        assert_eq!(fetched.tone, Tone::Professional);
        assert_eq!(fetched.language, "en");
    }

    #[tokio::test]
    async fn kinds_never_cross_contaminate() {
        let store = MemoryChatStore::new();
        store.create_chat("u1", "w", ActionKind::Write).await.unwrap();
        store.create_chat("u1", "s", ActionKind::Summarize).await.unwrap();

        let writes = store.list_chats("u1", ActionKind::Write).await.unwrap();
        let summaries = store.list_chats("u1", ActionKind::Summarize).await.unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(summaries.len(), 1);
        assert_eq!(writes[0].title, "w");
        assert_eq!(summaries[0].title, "s");

        assert_ne!(
            store.active_chat("u1", ActionKind::Write).await.unwrap(),
            store.active_chat("u1", ActionKind::Summarize).await.unwrap()
        );
    }

    #[tokio::test]
    async fn deleting_active_chat_selects_most_recent_remaining() {
        let store = MemoryChatStore::new();
        store.create_chat("u1", "first", ActionKind::Reply).await.unwrap();
        let second = store.create_chat("u1", "second", ActionKind::Reply).await.unwrap();
        let third = store.create_chat("u1", "third", ActionKind::Reply).await.unwrap();

        store.delete_chat("u1", &third.id).await.unwrap();
        assert_eq!(
            store.active_chat("u1", ActionKind::Reply).await.unwrap(),
            Some(second.id)
        );
    }

    #[tokio::test]
    async fn deleting_last_chat_clears_active_reference() {
        let store = MemoryChatStore::new();
        let only = store.create_chat("u1", "only", ActionKind::Write).await.unwrap();
        store.delete_chat("u1", &only.id).await.unwrap();
        assert_eq!(store.active_chat("u1", ActionKind::Write).await.unwrap(), None);
    }

    #[tokio::test]
    async fn append_to_missing_id_is_not_found_and_isolated() {
        let store = MemoryChatStore::new();
        let chat = store.create_chat("u1", "t", ActionKind::Write).await.unwrap();

        let result = store
            .append_message("u1", &ChatId("no-such".into()), Role::User, "x")
            .await;
        assert!(matches!(result, Err(MailquillError::NotFound { .. })));
        assert!(store.get_chat("u1", &chat.id).await.unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn owner_scoping_applies() {
        let store = MemoryChatStore::new();
        let chat = store.create_chat("u1", "mine", ActionKind::Write).await.unwrap();
        let result = store.get_chat("u2", &chat.id).await;
        assert!(matches!(result, Err(MailquillError::NotFound { .. })));
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let store = MemoryChatStore::new();
        store.create_user("a@example.com", "h1").await.unwrap();
        let dup = store.create_user("a@example.com", "h2").await;
        assert!(matches!(dup, Err(MailquillError::Validation(_))));
    }
}
