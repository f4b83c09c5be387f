//! # Board Service
//!
//! The six board operations, implemented directly against a `BoardRepo`.
//!
//! # Developer Note
//! `add_card` and `vote_on_card` load the whole document, mutate it in
//! memory and replace it. Nothing locks the document in between, so two
//! concurrent writers to the same board can lose one update. Retro boards
//! see very little write contention; keep the pattern unless a targeted
//! update-by-path is added to the port.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Board, Card, NewBoard, NewCard};
use crate::traits::BoardRepo;

pub struct BoardService {
    repo: Arc<dyn BoardRepo>,
}

impl BoardService {
    pub fn new(repo: Arc<dyn BoardRepo>) -> Self {
        Self { repo }
    }

    /// All boards, newest first.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        Ok(self.repo.list_boards().await?)
    }

    pub async fn get_board(&self, id: &str) -> Result<Board> {
        self.load(id).await
    }

    /// Creates a board with the default column set.
    pub async fn create_board(&self, input: NewBoard) -> Result<Board> {
        let title = required(input.title, "title")?;
        let created_by = required(input.created_by, "createdBy")?;
        let description = input.description.filter(|d| !d.trim().is_empty());

        let board = Board::new(title, description, created_by);
        self.repo.insert_board(&board).await?;

        info!(board_id = %board.id, title = %board.title, "board created");
        Ok(board)
    }

    /// Appends a card to the column at `column_index`.
    pub async fn add_card(&self, board_id: &str, column_index: i64, input: NewCard) -> Result<Board> {
        let mut board = self.load(board_id).await?;

        let col = index_within(column_index, board.columns.len())
            .ok_or_else(|| AppError::validation("Invalid column index"))?;

        let text = required(input.text, "text")?;
        let author = required(input.author, "author")?;

        board.columns[col].cards.push(Card::new(text, author));
        self.persist(&board).await?;

        debug!(board_id = %board.id, column = col, "card added");
        Ok(board)
    }

    /// Adds exactly one vote to the card at `(column_index, card_index)`.
    ///
    /// Votes are not tracked per voter; the same caller may vote repeatedly.
    pub async fn vote_on_card(&self, board_id: &str, column_index: i64, card_index: i64) -> Result<Board> {
        let mut board = self.load(board_id).await?;

        let (col, card) = index_within(column_index, board.columns.len())
            .and_then(|col| {
                index_within(card_index, board.columns[col].cards.len()).map(|card| (col, card))
            })
            .ok_or_else(|| AppError::validation("Invalid column or card index"))?;

        board.columns[col].cards[card].votes += 1;
        self.persist(&board).await?;

        debug!(board_id = %board.id, column = col, card, "card voted");
        Ok(board)
    }

    /// Removes the board and everything nested in it.
    pub async fn delete_board(&self, id: &str) -> Result<()> {
        let uuid = parse_id(id)?;
        if !self.repo.delete_board(uuid).await? {
            return Err(AppError::board_not_found(id));
        }
        info!(board_id = %uuid, "board deleted");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Board> {
        match self.repo.get_board(parse_id(id)?).await? {
            Some(board) => Ok(board),
            None => Err(AppError::board_not_found(id)),
        }
    }

    /// Whole-document replace. The board may have been deleted since it was read.
    async fn persist(&self, board: &Board) -> Result<()> {
        if self.repo.save_board(board).await? {
            Ok(())
        } else {
            Err(AppError::board_not_found(board.id.to_string()))
        }
    }
}

/// A malformed id cannot name any board.
fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::board_not_found(raw))
}

fn index_within(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::validation(format!("{field} is required"))),
    }
}
