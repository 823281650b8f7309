// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat CRUD and active-chat operations.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use mailquill_core::MailquillError;

use crate::database::Database;
use crate::models::{ActionKind, Chat, ChatId, Message};

/// Insert a new chat and mark it active for its `(owner, kind)` scope.
pub async fn insert_chat(db: &Database, owner: &str, chat: &Chat) -> Result<(), MailquillError> {
    let owner = owner.to_string();
    let chat = chat.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            tx.execute(
                "INSERT INTO chats (id, owner, kind, title, tone, language, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    chat.id.0,
                    owner,
                    chat.kind.to_string(),
                    chat.title,
                    chat.tone.to_string(),
                    chat.language,
                    chat.created_at,
                    chat.updated_at,
                ],
            )?;
            tx.execute(
                "INSERT OR REPLACE INTO active_chats (owner, kind, chat_id) VALUES (?1, ?2, ?3)",
                params![owner, chat.kind.to_string(), chat.id.0],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a chat with its messages in conversation order.
pub async fn get_chat(
    db: &Database,
    owner: &str,
    id: &ChatId,
) -> Result<Option<Chat>, MailquillError> {
    let owner = owner.to_string();
    let id = id.0.clone();
    db.connection()
        .call(move |conn| Ok(fetch_chat(conn, &owner, &id)?))
        .await
        .map_err(crate::database::map_tr_err)
}

/// List chats of one kind, most recently created first, with messages.
pub async fn list_chats(
    db: &Database,
    owner: &str,
    kind: ActionKind,
) -> Result<Vec<Chat>, MailquillError> {
    let owner = owner.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, kind, tone, language, created_at, updated_at
                 FROM chats WHERE owner = ?1 AND kind = ?2
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt.query_map(params![owner, kind.to_string()], chat_from_row)?;
            let mut chats = Vec::new();
            for row in rows {
                let mut chat = row?;
                chat.messages = fetch_messages(conn, &chat.id.0)?;
                chats.push(chat);
            }
            Ok(chats)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Partially update a chat's tone/language; `None` fields are unchanged.
/// Returns the updated chat, or `None` when the chat is absent or foreign.
pub async fn patch_chat(
    db: &Database,
    owner: &str,
    id: &ChatId,
    tone: Option<String>,
    language: Option<String>,
    updated_at: &str,
) -> Result<Option<Chat>, MailquillError> {
    let owner = owner.to_string();
    let id = id.0.clone();
    let updated_at = updated_at.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE chats SET tone = COALESCE(?1, tone),
                                  language = COALESCE(?2, language),
                                  updated_at = ?3
                 WHERE id = ?4 AND owner = ?5",
                params![tone, language, updated_at, id, owner],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            Ok(fetch_chat(conn, &owner, &id)?)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a chat and its messages. If it was the active chat of its scope,
/// the most recently created remaining chat becomes active (or the scope is
/// cleared). Returns `false` when the chat is absent or foreign.
pub async fn delete_chat(db: &Database, owner: &str, id: &ChatId) -> Result<bool, MailquillError> {
    let owner = owner.to_string();
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let kind: Option<String> = tx
                .query_row(
                    "SELECT kind FROM chats WHERE id = ?1 AND owner = ?2",
                    params![id, owner],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(kind) = kind else {
                return Ok(false);
            };

            let was_active: Option<String> = tx
                .query_row(
                    "SELECT chat_id FROM active_chats WHERE owner = ?1 AND kind = ?2",
                    params![owner, kind],
                    |row| row.get(0),
                )
                .optional()?;

            tx.execute("DELETE FROM messages WHERE chat_id = ?1", params![id])?;
            tx.execute("DELETE FROM chats WHERE id = ?1", params![id])?;

            if was_active.as_deref() == Some(id.as_str()) {
                let replacement: Option<String> = tx
                    .query_row(
                        "SELECT id FROM chats WHERE owner = ?1 AND kind = ?2
                         ORDER BY created_at DESC, rowid DESC LIMIT 1",
                        params![owner, kind],
                        |row| row.get(0),
                    )
                    .optional()?;
                match replacement {
                    Some(next_id) => {
                        tx.execute(
                            "INSERT OR REPLACE INTO active_chats (owner, kind, chat_id)
                             VALUES (?1, ?2, ?3)",
                            params![owner, kind, next_id],
                        )?;
                    }
                    None => {
                        tx.execute(
                            "DELETE FROM active_chats WHERE owner = ?1 AND kind = ?2",
                            params![owner, kind],
                        )?;
                    }
                }
            }

            tx.commit()?;
            Ok(true)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The active chat id for `(owner, kind)`, if any.
pub async fn get_active(
    db: &Database,
    owner: &str,
    kind: ActionKind,
) -> Result<Option<ChatId>, MailquillError> {
    let owner = owner.to_string();
    db.connection()
        .call(move |conn| {
            let id: Option<String> = conn
                .query_row(
                    "SELECT chat_id FROM active_chats WHERE owner = ?1 AND kind = ?2",
                    params![owner, kind.to_string()],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(id.map(ChatId))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark an existing chat active for its scope. Returns `false` when the chat
/// is absent or foreign.
pub async fn set_active(db: &Database, owner: &str, id: &ChatId) -> Result<bool, MailquillError> {
    let owner = owner.to_string();
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let kind: Option<String> = conn
                .query_row(
                    "SELECT kind FROM chats WHERE id = ?1 AND owner = ?2",
                    params![id, owner],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(kind) = kind else {
                return Ok(false);
            };
            conn.execute(
                "INSERT OR REPLACE INTO active_chats (owner, kind, chat_id) VALUES (?1, ?2, ?3)",
                params![owner, kind, id],
            )?;
            Ok(true)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch a chat row plus its messages. Shared by the query entry points.
pub(crate) fn fetch_chat(
    conn: &Connection,
    owner: &str,
    id: &str,
) -> rusqlite::Result<Option<Chat>> {
    let chat = conn
        .query_row(
            "SELECT id, title, kind, tone, language, created_at, updated_at
             FROM chats WHERE id = ?1 AND owner = ?2",
            params![id, owner],
            chat_from_row,
        )
        .optional()?;
    match chat {
        Some(mut chat) => {
            chat.messages = fetch_messages(conn, &chat.id.0)?;
            Ok(Some(chat))
        }
        None => Ok(None),
    }
}

/// Messages in insertion (conversation) order.
pub(crate) fn fetch_messages(
    conn: &Connection,
    chat_id: &str,
) -> rusqlite::Result<Vec<Message>> {
    let mut stmt = conn.prepare(
        "SELECT id, role, content, created_at FROM messages
         WHERE chat_id = ?1 ORDER BY rowid ASC",
    )?;
    let rows = stmt.query_map(params![chat_id], |row| {
        let role_raw: String = row.get(1)?;
        Ok(Message {
            id: row.get(0)?,
            role: role_raw.parse().map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    format!("unknown role `{role_raw}`").into(),
                )
            })?,
            content: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    let mut messages = Vec::new();
    for row in rows {
        messages.push(row?);
    }
    Ok(messages)
}

fn chat_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Chat> {
    let kind_raw: String = row.get(2)?;
    let kind: ActionKind = kind_raw.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown action kind `{kind_raw}`").into(),
        )
    })?;
    // Tone rows are written from the enum; anything else folds to the default.
    let tone_raw: String = row.get(3)?;
    Ok(Chat {
        id: ChatId(row.get(0)?),
        title: row.get(1)?,
        kind,
        tone: tone_raw.parse().unwrap_or_default(),
        language: row.get(4)?,
        messages: Vec::new(),
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
