// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat store trait for conversation persistence backends.

use async_trait::async_trait;

use crate::error::MailquillError;
use crate::types::{ActionKind, Chat, ChatId, ChatPatch, Role, User};

/// Persistence backend for chats and their messages.
///
/// Every operation is scoped by an `owner` string: the authenticated user id
/// for durable storage, or any caller-chosen scope for ephemeral storage.
/// The contract is identical either way; callers must not assume one or the
/// other.
///
/// Histories are kept separate per action kind and never cross-contaminate.
/// Message order within a chat is append-only. The store tracks at most one
/// active chat per `(owner, kind)` scope.
#[async_trait]
pub trait ChatStore: Send + Sync + 'static {
    /// Creates a chat with default tone/language and an empty history.
    /// The new chat becomes the active chat for its `(owner, kind)` scope.
    async fn create_chat(
        &self,
        owner: &str,
        title: &str,
        kind: ActionKind,
    ) -> Result<Chat, MailquillError>;

    /// Lists chats of one action kind, most recently created first.
    async fn list_chats(&self, owner: &str, kind: ActionKind)
        -> Result<Vec<Chat>, MailquillError>;

    /// Fetches a chat with its messages in conversation order.
    async fn get_chat(&self, owner: &str, id: &ChatId) -> Result<Chat, MailquillError>;

    /// Applies a partial update; omitted fields are unchanged.
    async fn patch_chat(
        &self,
        owner: &str,
        id: &ChatId,
        patch: ChatPatch,
    ) -> Result<Chat, MailquillError>;

    /// Appends a message to the end of the chat's history.
    async fn append_message(
        &self,
        owner: &str,
        id: &ChatId,
        role: Role,
        content: &str,
    ) -> Result<Chat, MailquillError>;

    /// Removes a chat and its messages. If it was the active chat of its
    /// scope, the most recently created remaining chat becomes active, or
    /// the scope is left with no active chat.
    async fn delete_chat(&self, owner: &str, id: &ChatId) -> Result<(), MailquillError>;

    /// The active chat id for `(owner, kind)`, if any.
    async fn active_chat(
        &self,
        owner: &str,
        kind: ActionKind,
    ) -> Result<Option<ChatId>, MailquillError>;

    /// Marks an existing chat as the active chat of its scope.
    async fn select_chat(&self, owner: &str, id: &ChatId) -> Result<(), MailquillError>;
}

/// Account persistence for credential auth.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Registers an account. Fails with [`MailquillError::Validation`] when
    /// the email is already taken.
    async fn create_user(&self, email: &str, password_hash: &str)
        -> Result<User, MailquillError>;

    /// Looks an account up by email.
    async fn find_user(&self, email: &str) -> Result<Option<User>, MailquillError>;
}
