// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread; the [`Database`] struct IS the single writer. Query modules accept
//! `&Database` and call through `db.connection().call()`. Do NOT create
//! additional Connection instances for writes.

use std::path::Path;

use mailquill_core::MailquillError;

/// Handle to the single SQLite connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if necessary) the database at `path`, runs pending
    /// migrations, and applies connection PRAGMAs.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, MailquillError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(map_err)?;
        }

        // Migrations run on a short-lived blocking connection before the
        // async connection takes over as the single writer.
        let migrate_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), MailquillError> {
            let mut conn = rusqlite::Connection::open(&migrate_path).map_err(map_err)?;
            crate::migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(map_err)??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_err)?;

        let journal_mode = if wal_mode { "WAL" } else { "DELETE" };
        let pragmas = format!(
            "PRAGMA journal_mode={journal_mode};\n\
             PRAGMA foreign_keys=ON;\n\
             PRAGMA busy_timeout=5000;"
        );
        conn.call(move |conn| {
            conn.execute_batch(&pragmas)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        tracing::debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL ahead of shutdown.
    pub async fn close(&self) -> Result<(), MailquillError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        tracing::debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Maps a tokio-rusqlite error into the crate error type.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> MailquillError {
    MailquillError::Persistence {
        source: Box::new(e),
    }
}

fn map_err(e: impl std::error::Error + Send + Sync + 'static) -> MailquillError {
    MailquillError::Persistence {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_database_file_and_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("open_test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        assert!(db_path.exists());

        // Migrated tables are queryable.
        db.connection()
            .call(|conn| {
                conn.execute_batch(
                    "SELECT 1 FROM users; SELECT 1 FROM chats; \
                     SELECT 1 FROM messages; SELECT 1 FROM active_chats;",
                )?;
                Ok::<_, rusqlite::Error>(())
            })
            .await
            .unwrap();

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/dirs/test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        assert!(db_path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        {
            let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
            db.close().await.unwrap();
        }
        // Second open re-runs the migration runner, which must be a no-op.
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        db.close().await.unwrap();
    }
}
