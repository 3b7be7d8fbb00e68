//! Axum route handlers for the Chat API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chat::assistant::{ChatRequest, ChatResult};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    #[serde(flatten)]
    pub result: ChatResult,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;

    let result = state.chat.reply(&request).await;

    Ok(Json(ChatResponse {
        result,
        generated_at: Utc::now(),
    }))
}
