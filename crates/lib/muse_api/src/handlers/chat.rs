//! Chat request handler.

use axum::Json;
use axum::extract::State;
use muse_core::chat::{ChatOutcome, ChatRequest};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppJson;

/// `POST /chat` — run one chat turn and return the stored reply.
pub async fn chat_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<ChatRequest>,
) -> AppResult<Json<ChatOutcome>> {
    let outcome = state.chat.chat(body).await?;
    Ok(Json(outcome))
}
