//! Conversation request handlers.

use axum::Json;
use axum::extract::State;
use muse_core::conversations::{self, DEFAULT_CONVERSATION_LIMIT};
use muse_core::models::{Conversation, NewConversation};

use super::resolve_limit;
use crate::AppState;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::models::LimitQuery;

/// `POST /conversations` — create a conversation.
pub async fn create_conversation_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<NewConversation>,
) -> AppResult<Json<Conversation>> {
    let created = conversations::create_conversation(state.store.as_ref(), body).await?;
    Ok(Json(created))
}

/// `GET /conversations` — newest conversations first.
pub async fn list_conversations_handler(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LimitQuery>,
) -> AppResult<Json<Vec<Conversation>>> {
    let limit = resolve_limit(query.limit, DEFAULT_CONVERSATION_LIMIT)?;
    let items = conversations::list_conversations(state.store.as_ref(), limit).await?;
    Ok(Json(items))
}
