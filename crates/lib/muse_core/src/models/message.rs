//! Message entity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ValidationError, check_length, check_text};

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            _ => Err(ValidationError::new(
                "role",
                "must be one of user, assistant, system",
            )),
        }
    }
}

/// Message as submitted by a caller. `role` is still free text here.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub conversation_id: String,
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tokens: Option<i64>,
}

/// Validated message, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageDraft {
    pub conversation_id: String,
    pub role: Role,
    pub content: String,
    pub model: Option<String>,
    pub tokens: Option<u64>,
}

impl NewMessage {
    pub fn validate(self) -> Result<MessageDraft, ValidationError> {
        check_length("conversation_id", &self.conversation_id, 1, None)?;
        let role = self.role.parse::<Role>()?;
        check_length("content", &self.content, 1, None)?;
        if let Some(model) = &self.model {
            check_text("model", model)?;
        }
        let tokens = self
            .tokens
            .map(|t| {
                u64::try_from(t).map_err(|_| ValidationError::new("tokens", "must be at least 0"))
            })
            .transpose()?;

        Ok(MessageDraft {
            conversation_id: self.conversation_id,
            role,
            content: self.content,
            model: self.model,
            tokens,
        })
    }
}

impl MessageDraft {
    /// A user turn: no model, no token count.
    pub fn user(conversation_id: &str, content: &str) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            role: Role::User,
            content: content.to_string(),
            model: None,
            tokens: None,
        }
    }

    /// An assistant turn produced by `model`.
    pub fn assistant(conversation_id: &str, content: &str, model: &str, tokens: u64) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            role: Role::Assistant,
            content: content.to_string(),
            model: Some(model.to_string()),
            tokens: Some(tokens),
        }
    }
}

/// Stored message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tokens: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
