//! motormate-server: HTTP chat backend for the MotorMate automotive assistant
//!
//! Exposes `POST /chat`, which takes `{ message, history }`, asks the language
//! model for a reply and returns `{ response, history, success }`. The server
//! keeps no state between requests; the client echoes history back each turn.

pub mod error;
pub mod handlers;
pub mod model;
pub mod prompt;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header},
    routing::post,
};
use tower_http::cors::{Any, CorsLayer};

pub use error::{ApiError, ModelError, Result};
pub use model::{ChatModel, DEFAULT_OLLAMA_URL, ModelMessage, OllamaModel, Role};

/// Shared router state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn ChatModel>,
}

impl AppState {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

/// Largest accepted request body. History is echoed back in full every turn,
/// so this bounds conversation length.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Build the application router
pub fn router(state: AppState) -> Router {
    router_with_limit(state, MAX_BODY_BYTES)
}

/// Build the application router, rejecting bodies over `body_limit` bytes with 413
pub fn router_with_limit(state: AppState, body_limit: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/chat", post(handlers::chat))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}
