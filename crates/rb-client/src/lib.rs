//! # rb-client
//!
//! Typed HTTP wrappers over the Retro-Board API, one method per endpoint.
//! Front-ends use these instead of building URLs by hand.

use rb_core::models::{Board, NewBoard, NewCard};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone, Debug)]
pub struct RetroClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for RetroClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl RetroClient {
    /// `base_url` includes the API prefix, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_boards(&self) -> Result<Vec<Board>> {
        let response = self.http.get(self.url("/boards")).send().await?;
        decode(response).await
    }

    pub async fn get_board_by_id(&self, id: &str) -> Result<Board> {
        let response = self.http.get(self.url(&format!("/boards/{id}"))).send().await?;
        decode(response).await
    }

    pub async fn create_board(&self, board: &NewBoard) -> Result<Board> {
        let response = self.http.post(self.url("/boards")).json(board).send().await?;
        decode(response).await
    }

    pub async fn add_card(&self, board_id: &str, column_index: usize, card: &NewCard) -> Result<Board> {
        let path = format!("/boards/{board_id}/columns/{column_index}/cards");
        let response = self.http.post(self.url(&path)).json(card).send().await?;
        decode(response).await
    }

    pub async fn vote_on_card(&self, board_id: &str, column_index: usize, card_index: usize) -> Result<Board> {
        let path = format!("/boards/{board_id}/columns/{column_index}/cards/{card_index}/vote");
        let response = self.http.put(self.url(&path)).send().await?;
        decode(response).await
    }

    pub async fn delete_board(&self, id: &str) -> Result<()> {
        let response = self.http.delete(self.url(&format!("/boards/{id}"))).send().await?;
        check(response).await.map(|_| ())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    Ok(check(response).await?.json().await?)
}

/// Turns a non-2xx response into `ClientError::Api`, keeping the server's message.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            }
        });

    debug!(%status, %message, "api call failed");
    Err(ClientError::Api { status, message })
}
