//! Request handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use motormate_api::Turn;
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiError;
use crate::prompt::build_conversation;

/// `POST /chat`
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .ok_or(ApiError::NoMessage)?
        .trim();
    if message.is_empty() {
        return Err(ApiError::EmptyMessage);
    }

    let history = match body.get("history") {
        None => Vec::new(),
        Some(Value::Array(entries)) => entries.clone(),
        Some(_) => return Err(ApiError::Internal("'history' must be a list".to_string())),
    };

    let conversation = build_conversation(&history, message)?;
    tracing::info!(
        chars = message.chars().count(),
        history_len = history.len(),
        "chat request"
    );

    let reply = state.model.complete(&conversation).await?;

    let mut history = history;
    history.push(Turn::human(message).to_value());
    history.push(Turn::ai(reply.as_str()).to_value());

    Ok(Json(json!({
        "response": reply,
        "history": history,
        "success": true,
    })))
}

/// Any unknown route
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
