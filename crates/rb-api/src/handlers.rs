//! # rb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the board service.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rb_core::error::AppError;
use rb_core::models::{Board, NewBoard, NewCard};
use rb_core::BoardService;
use serde_json::{json, Value};
use tracing::{debug, error};

/// State shared across all request handlers.
pub struct AppState {
    pub boards: BoardService,
}

pub type SharedState = Arc<AppState>;

// ── Error handling ────────────────────────────────────────────────────

/// HTTP face of `AppError`: a status code and a `{"message": ...}` body.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            debug!(error = %self.0, status = status.as_u16(), "request rejected");
        }

        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}

/// Index segments arrive as raw path text; anything but an integer is rejected.
///
/// The board lookup still runs first, so a missing board is a 404 whatever
/// the indices look like.
async fn parse_indices<const N: usize>(
    state: &AppState,
    board_id: &str,
    raw: [&str; N],
    msg: &str,
) -> Result<[i64; N], ApiError> {
    let mut parsed = [0; N];
    for (slot, segment) in parsed.iter_mut().zip(raw) {
        match segment.parse() {
            Ok(index) => *slot = index,
            Err(_) => {
                state.boards.get_board(board_id).await?;
                return Err(ApiError(AppError::validation(msg)));
            }
        }
    }
    Ok(parsed)
}

// ── Handlers ──────────────────────────────────────────────────────────

/// `GET /` outside the API prefix.
pub async fn index() -> &'static str {
    "Retrospective API is running"
}

pub async fn list_boards(State(state): State<SharedState>) -> Result<Json<Vec<Board>>, ApiError> {
    Ok(Json(state.boards.list_boards().await?))
}

pub async fn get_board(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Board>, ApiError> {
    Ok(Json(state.boards.get_board(&id).await?))
}

pub async fn create_board(
    State(state): State<SharedState>,
    payload: Result<Json<NewBoard>, JsonRejection>,
) -> Result<(StatusCode, Json<Board>), ApiError> {
    let Json(input) = payload?;
    let board = state.boards.create_board(input).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

pub async fn add_card(
    State(state): State<SharedState>,
    Path((id, column_index)): Path<(String, String)>,
    payload: Result<Json<NewCard>, JsonRejection>,
) -> Result<(StatusCode, Json<Board>), ApiError> {
    let [column_index] = parse_indices(&state, &id, [column_index.as_str()], "Invalid column index").await?;
    let Json(input) = payload?;
    let board = state.boards.add_card(&id, column_index, input).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

pub async fn vote_on_card(
    State(state): State<SharedState>,
    Path((id, column_index, card_index)): Path<(String, String, String)>,
) -> Result<Json<Board>, ApiError> {
    let [column_index, card_index] = parse_indices(
        &state,
        &id,
        [column_index.as_str(), card_index.as_str()],
        "Invalid column or card index",
    )
    .await?;
    Ok(Json(state.boards.vote_on_card(&id, column_index, card_index).await?))
}

pub async fn delete_board(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.boards.delete_board(&id).await?;
    Ok(Json(json!({ "message": "Board deleted successfully" })))
}
