//! # rb-api
//!
//! The HTTP routing layer for Retro-Board.

pub mod handlers;
pub mod middleware;

use axum::routing::{get, post, put};
use axum::Router;

pub use handlers::{ApiError, AppState, SharedState};

/// Board endpoints, relative to the API prefix.
pub fn board_routes() -> Router<SharedState> {
    Router::new()
        .route("/boards", get(handlers::list_boards).post(handlers::create_board))
        .route("/boards/{id}", get(handlers::get_board).delete(handlers::delete_board))
        .route("/boards/{id}/columns/{column_index}/cards", post(handlers::add_card))
        .route(
            "/boards/{id}/columns/{column_index}/cards/{card_index}/vote",
            put(handlers::vote_on_card),
        )
}

/// Builds the full application.
///
/// # Developer Note
/// The board routes are mounted under `prefix` (e.g. `/api`) so the binary
/// can move the API without touching handlers. An empty prefix or `/`
/// mounts them at the root.
pub fn router(state: SharedState, prefix: &str) -> Router {
    let prefix = prefix.trim_end_matches('/');
    let api = if prefix.is_empty() {
        Router::new().merge(board_routes())
    } else if prefix.starts_with('/') {
        Router::new().nest(prefix, board_routes())
    } else {
        Router::new().nest(&format!("/{prefix}"), board_routes())
    };

    let app = api.route("/", get(handlers::index)).with_state(state);
    middleware::standard_middleware(app)
}
