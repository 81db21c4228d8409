//! Conversation entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ValidationError, check_length, check_text};

/// Title given to conversations opened implicitly by a chat turn.
pub const DEFAULT_TITLE: &str = "New Chat";

const TITLE_MAX_CHARS: usize = 120;

/// Conversation as submitted by a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewConversation {
    #[serde(default)]
    pub user_id: Option<String>,
    pub title: String,
}

/// Validated conversation, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationDraft {
    pub user_id: Option<String>,
    pub title: String,
}

impl NewConversation {
    pub fn validate(self) -> Result<ConversationDraft, ValidationError> {
        check_length("title", &self.title, 1, Some(TITLE_MAX_CHARS))?;
        if let Some(user_id) = &self.user_id {
            check_text("user_id", user_id)?;
        }
        Ok(ConversationDraft {
            user_id: self.user_id,
            title: self.title,
        })
    }
}

impl ConversationDraft {
    /// Draft for a conversation opened by a chat turn.
    pub fn untitled() -> Self {
        Self {
            user_id: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Stored conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
