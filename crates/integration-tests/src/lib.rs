//! Shared fixtures for the cross-crate tests.

use std::sync::Arc;

use rb_api::AppState;
use rb_core::{BoardRepo, BoardService};
use rb_store_memory::MemoryBoardRepo;

pub fn memory_service() -> BoardService {
    BoardService::new(Arc::new(MemoryBoardRepo::new()))
}

/// The full HTTP application over `repo`, mounted under `/api`.
pub fn app_with(repo: Arc<dyn BoardRepo>) -> axum::Router {
    let state = Arc::new(AppState {
        boards: BoardService::new(repo),
    });
    rb_api::router(state, "/api")
}

pub fn memory_app() -> axum::Router {
    app_with(Arc::new(MemoryBoardRepo::new()))
}
