//! # rb-db-sqlite Implementation
//!
//! Document-store implementation of `BoardRepo` on SQLite.
//! Each board is one row holding the full nested document as JSON; the
//! `created_at` column exists only for ordering.

use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rb_core::models::Board;
use rb_core::traits::BoardRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::info;
use uuid::Uuid;

pub struct SqliteBoardRepo {
    pool: SqlitePool,
}

impl SqliteBoardRepo {
    /// Opens (creating if missing) the database at `url` and runs migrations.
    ///
    /// # Developer Note
    /// sqlx opens `sqlite::memory:` as a named shared-cache database, so
    /// pooled connections see the same data, but the database is dropped
    /// once its last connection closes. In-memory URLs therefore keep one
    /// connection open for the life of the pool.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid sqlite url {url:?}"))?
            .create_if_missing(true);

        let in_memory = url.contains(":memory:");
        let max_connections = if in_memory { 1 } else { max_connections.max(1) };

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        if in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .context("failed to open sqlite database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run sqlite migrations")?;

        info!(max_connections, "sqlite board store ready");
        Ok(Self { pool })
    }
}

/// Fixed-width timestamps so lexical order in SQL equals time order.
fn sort_key(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode(document: &str) -> anyhow::Result<Board> {
    serde_json::from_str(document).context("corrupt board document")
}

#[async_trait]
impl BoardRepo for SqliteBoardRepo {
    async fn list_boards(&self) -> anyhow::Result<Vec<Board>> {
        let rows = sqlx::query("SELECT document FROM boards ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| decode(row.try_get::<&str, _>("document")?))
            .collect()
    }

    async fn get_board(&self, id: Uuid) -> anyhow::Result<Option<Board>> {
        let row = sqlx::query("SELECT document FROM boards WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(decode(row.try_get::<&str, _>("document")?)?)),
            None => Ok(None),
        }
    }

    async fn insert_board(&self, board: &Board) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO boards (id, created_at, document) VALUES (?, ?, ?)")
            .bind(board.id.to_string())
            .bind(sort_key(&board.created_at))
            .bind(serde_json::to_string(board)?)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Whole-document replace; `created_at` is never rewritten.
    async fn save_board(&self, board: &Board) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE boards SET document = ? WHERE id = ?")
            .bind(serde_json::to_string(board)?)
            .bind(board.id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_board(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM boards WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
