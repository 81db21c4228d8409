//! Conversation and message persistence.
//!
//! Typed create/list operations over the `conversation` and `message`
//! collections. Creation validates input before any store call.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    Conversation, ConversationDraft, Message, MessageDraft, NewConversation, NewMessage,
    ValidationError,
};
use crate::store::{
    CONVERSATIONS, Document, DocumentStore, Filter, MESSAGES, StoreError, filter_eq, to_fields,
};

/// Default page size for conversation listings.
pub const DEFAULT_CONVERSATION_LIMIT: usize = 50;

/// Default page size for message listings.
pub const DEFAULT_MESSAGE_LIMIT: usize = 100;

/// Errors from validated create operations.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validate and persist a conversation.
pub async fn create_conversation(
    store: &dyn DocumentStore,
    input: NewConversation,
) -> Result<Conversation, ConversationError> {
    let draft = input.validate()?;
    Ok(insert_conversation(store, &draft).await?)
}

/// Persist an already validated conversation.
pub async fn insert_conversation(
    store: &dyn DocumentStore,
    draft: &ConversationDraft,
) -> Result<Conversation, StoreError> {
    let doc = store.create(CONVERSATIONS, to_fields(draft)?).await?;
    decode_stored(doc)
}

/// Newest conversations first.
pub async fn list_conversations(
    store: &dyn DocumentStore,
    limit: usize,
) -> Result<Vec<Conversation>, StoreError> {
    store
        .query(CONVERSATIONS, &Filter::new(), limit)
        .await?
        .into_iter()
        .map(|doc| doc.into_entity())
        .collect()
}

/// Validate and persist a message.
///
/// `conversation_id` is stored as given; the conversation is not looked up.
pub async fn create_message(
    store: &dyn DocumentStore,
    input: NewMessage,
) -> Result<Message, ConversationError> {
    let draft = input.validate()?;
    Ok(insert_message(store, &draft).await?)
}

/// Persist an already validated message.
pub async fn insert_message(
    store: &dyn DocumentStore,
    draft: &MessageDraft,
) -> Result<Message, StoreError> {
    let doc = store.create(MESSAGES, to_fields(draft)?).await?;
    decode_stored(doc)
}

/// Decode a freshly written document. It is already stored, so a decode
/// failure is reported against its id.
fn decode_stored<T: DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    let id = doc.id.clone();
    doc.into_entity().map_err(|e| StoreError::read_back(id, e))
}

/// Newest messages first, optionally restricted to one conversation.
pub async fn list_messages(
    store: &dyn DocumentStore,
    conversation_id: Option<&str>,
    limit: usize,
) -> Result<Vec<Message>, StoreError> {
    let filter = match conversation_id {
        Some(id) => filter_eq("conversation_id", id),
        None => Filter::new(),
    };

    store
        .query(MESSAGES, &filter, limit)
        .await?
        .into_iter()
        .map(|doc| doc.into_entity())
        .collect()
}
