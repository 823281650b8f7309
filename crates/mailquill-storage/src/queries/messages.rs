// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message append operations.

use rusqlite::{params, OptionalExtension};

use mailquill_core::MailquillError;

use crate::database::Database;
use crate::models::{Chat, ChatId, Message};
use crate::queries::chats::fetch_chat;

/// Append a message to the end of a chat's history and bump the chat's
/// `updated_at`. Returns the updated chat with messages, or `None` when the
/// chat is absent or foreign. Other chats are never touched.
pub async fn append_message(
    db: &Database,
    owner: &str,
    chat_id: &ChatId,
    message: &Message,
) -> Result<Option<Chat>, MailquillError> {
    let owner = owner.to_string();
    let chat_id = chat_id.0.clone();
    let message = message.clone();
    db.connection()
        .call(move |conn| {
            let owned: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM chats WHERE id = ?1 AND owner = ?2",
                    params![chat_id, owner],
                    |row| row.get(0),
                )
                .optional()?;
            if owned.is_none() {
                return Ok(None);
            }

            conn.execute(
                "INSERT INTO messages (id, chat_id, role, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    message.id,
                    chat_id,
                    message.role.to_string(),
                    message.content,
                    message.created_at,
                ],
            )?;
            conn.execute(
                "UPDATE chats SET updated_at = ?1 WHERE id = ?2",
                params![message.created_at, chat_id],
            )?;

            Ok(fetch_chat(conn, &owner, &chat_id)?)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
