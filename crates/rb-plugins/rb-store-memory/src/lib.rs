//! # rb-store-memory
//!
//! In-process implementation of `BoardRepo` backed by a `DashMap`.
//! Data lives only as long as the process. Used by tests and for
//! throwaway demo deployments.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rb_core::models::Board;
use rb_core::traits::BoardRepo;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryBoardRepo {
    boards: DashMap<Uuid, Board>,
}

impl MemoryBoardRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardRepo for MemoryBoardRepo {
    async fn list_boards(&self) -> anyhow::Result<Vec<Board>> {
        let mut boards: Vec<Board> = self.boards.iter().map(|entry| entry.value().clone()).collect();
        boards.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(boards)
    }

    async fn get_board(&self, id: Uuid) -> anyhow::Result<Option<Board>> {
        Ok(self.boards.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert_board(&self, board: &Board) -> anyhow::Result<()> {
        match self.boards.entry(board.id) {
            Entry::Occupied(_) => anyhow::bail!("duplicate board id {}", board.id),
            Entry::Vacant(slot) => {
                slot.insert(board.clone());
                Ok(())
            }
        }
    }

    async fn save_board(&self, board: &Board) -> anyhow::Result<bool> {
        match self.boards.get_mut(&board.id) {
            Some(mut stored) => {
                *stored = board.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_board(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.boards.remove(&id).is_some())
    }
}
