//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Board;

/// Document-store contract for boards.
///
/// Boards are stored and replaced as whole documents; there is no
/// partial update. Callers doing read-modify-write get last-write-wins.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BoardRepo: Send + Sync {
    /// All boards, newest `created_at` first.
    async fn list_boards(&self) -> anyhow::Result<Vec<Board>>;

    async fn get_board(&self, id: Uuid) -> anyhow::Result<Option<Board>>;

    async fn insert_board(&self, board: &Board) -> anyhow::Result<()>;

    /// Replaces the stored document. Returns `false` if it no longer exists.
    async fn save_board(&self, board: &Board) -> anyhow::Result<bool>;

    /// Returns `false` if there was nothing to delete.
    async fn delete_board(&self, id: Uuid) -> anyhow::Result<bool>;
}
