//! rb-core
//!
//! The board document model, the storage port, and the board operations
//! for Retro-Board.

pub mod error;
pub mod models;
pub mod service;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use service::BoardService;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn default_columns_are_fixed_and_empty() {
        let columns = default_columns();
        assert_eq!(columns.len(), 3);
        for (column, title) in columns.iter().zip(DEFAULT_COLUMN_TITLES) {
            assert_eq!(column.title, title);
            assert!(column.cards.is_empty());
        }
    }

    #[test]
    fn board_json_uses_camel_case_and_omits_missing_description() {
        let board = Board::new("Sprint 1".into(), None, "alice".into());
        let json = serde_json::to_value(&board).unwrap();

        assert_eq!(json["createdBy"], "alice");
        assert_eq!(json["isActive"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("description").is_none());
        assert_eq!(json["columns"][2]["title"], "Action items");
    }

    #[test]
    fn new_board_ignores_caller_columns() {
        let input: NewBoard = serde_json::from_value(serde_json::json!({
            "title": "Sprint 2",
            "createdBy": "bob",
            "columns": [{ "title": "Custom", "cards": [] }]
        }))
        .unwrap();

        assert_eq!(input.title.as_deref(), Some("Sprint 2"));
        assert_eq!(input.created_by.as_deref(), Some("bob"));
    }

    #[test]
    fn new_card_starts_without_votes() {
        let card = Card::new("pairing helped".into(), "carol".into());
        assert_eq!(card.votes, 0);
    }
}
