// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account queries for credential auth.

use rusqlite::{params, OptionalExtension};

use mailquill_core::MailquillError;

use crate::database::Database;
use crate::models::User;

/// Insert a new account. Returns `false` when the email is already taken.
///
/// The taken check and the insert run on the single writer thread, so the
/// pair cannot race another registration.
pub async fn insert_user(db: &Database, user: &User) -> Result<bool, MailquillError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            let taken: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM users WHERE email = ?1",
                    params![user.email],
                    |row| row.get(0),
                )
                .optional()?;
            if taken.is_some() {
                return Ok(false);
            }
            conn.execute(
                "INSERT INTO users (id, email, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![user.id, user.email, user.password_hash, user.created_at],
            )?;
            Ok(true)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Look an account up by email.
pub async fn find_user(db: &Database, email: &str) -> Result<Option<User>, MailquillError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let user = conn
                .query_row(
                    "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1",
                    params![email],
                    |row| {
                        Ok(User {
                            id: row.get(0)?,
                            email: row.get(1)?,
                            password_hash: row.get(2)?,
                            created_at: row.get(3)?,
                        })
                    },
                )
                .optional()?;
            Ok(user)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
