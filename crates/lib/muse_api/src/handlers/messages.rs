//! Message request handlers.

use axum::Json;
use axum::extract::State;
use muse_core::conversations::{self, DEFAULT_MESSAGE_LIMIT};
use muse_core::models::{Message, NewMessage};

use super::resolve_limit;
use crate::AppState;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::models::MessageListQuery;

/// `POST /messages` — create a message.
pub async fn create_message_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<NewMessage>,
) -> AppResult<Json<Message>> {
    let created = conversations::create_message(state.store.as_ref(), body).await?;
    Ok(Json(created))
}

/// `GET /messages` — newest messages first, optionally for one conversation.
pub async fn list_messages_handler(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<MessageListQuery>,
) -> AppResult<Json<Vec<Message>>> {
    let limit = resolve_limit(query.limit, DEFAULT_MESSAGE_LIMIT)?;
    // An empty `?conversation_id=` means no filter.
    let conversation_id = query.conversation_id.as_deref().filter(|id| !id.is_empty());
    let items = conversations::list_messages(state.store.as_ref(), conversation_id, limit).await?;
    Ok(Json(items))
}
