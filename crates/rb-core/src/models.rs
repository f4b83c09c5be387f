//! # Domain Models
//!
//! A board is a single nested document: Board -> Column -> Card.
//! Columns and cards are embedded and addressed by position only.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Titles of the columns every board starts with, in display order.
pub const DEFAULT_COLUMN_TITLES: [&str; 3] =
    ["What went well", "What could be improved", "Action items"];

/// A retrospective session's root document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Always exactly three, in `DEFAULT_COLUMN_TITLES` order.
    pub columns: Vec<Column>,
    /// Free text, never authenticated.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

/// A named bucket holding an ordered sequence of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// A single feedback item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Sub-document id. Never used for addressing.
    pub id: Uuid,
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub votes: u64,
    pub created_at: DateTime<Utc>,
}

/// Caller input for creating a board. Anything else in the payload
/// (including `columns`) is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard {
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by: Option<String>,
}

/// Caller input for appending a card to a column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCard {
    pub text: Option<String>,
    pub author: Option<String>,
}

/// Builds the fixed initial column set, each with no cards.
pub fn default_columns() -> Vec<Column> {
    DEFAULT_COLUMN_TITLES
        .iter()
        .map(|title| Column {
            id: Uuid::now_v7(),
            title: (*title).to_string(),
            cards: Vec::new(),
        })
        .collect()
}

impl Board {
    /// A fresh board with default columns. Input is assumed validated.
    pub fn new(title: String, description: Option<String>, created_by: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            title,
            description,
            columns: default_columns(),
            created_by,
            created_at: Utc::now(),
            is_active: true,
        }
    }
}

impl Card {
    pub fn new(text: String, author: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            text,
            author,
            votes: 0,
            created_at: Utc::now(),
        }
    }
}
