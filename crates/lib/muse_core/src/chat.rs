//! Chat-turn orchestration.
//!
//! One turn resolves (or opens) a conversation, stores the user's message,
//! asks the injected [`ReplyGenerator`] for a reply and stores that as the
//! assistant's message. Steps run strictly in that order. There is no
//! transaction around them, so a failure part-way through is reported as
//! [`ChatError::PartialFailure`] together with what was already written.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::conversations::{insert_conversation, insert_message, list_messages};
use crate::models::{
    ConversationDraft, Message, MessageDraft, ValidationError, check_length, check_text,
};
use crate::presets;
use crate::reply::{ReplyError, ReplyGenerator, ReplyRequest};
use crate::store::{DocumentStore, StoreError};

/// Prior messages handed to the generator.
const HISTORY_LIMIT: usize = 100;

/// One inbound chat turn.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub conversation_id: Option<String>,
    pub message: String,
    /// Name of a built-in preset to steer the reply.
    #[serde(default)]
    pub preset_id: Option<String>,
}

/// Result of a completed turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatOutcome {
    pub conversation_id: String,
    pub reply: String,
    pub timestamp: DateTime<Utc>,
}

/// Step of a turn, used to report where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStage {
    CreateConversation,
    LoadHistory,
    StoreUserMessage,
    GenerateReply,
    StoreAssistantMessage,
}

impl fmt::Display for ChatStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChatStage::CreateConversation => "create_conversation",
            ChatStage::LoadHistory => "load_history",
            ChatStage::StoreUserMessage => "store_user_message",
            ChatStage::GenerateReply => "generate_reply",
            ChatStage::StoreAssistantMessage => "store_assistant_message",
        })
    }
}

/// Underlying cause of a failed step.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Reply(#[from] ReplyError),
}

/// Errors from a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Rejected before any store call.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Failed before anything was written.
    #[error("Chat failed at {stage}: {source}")]
    Failed {
        stage: ChatStage,
        #[source]
        source: StepError,
    },

    /// Failed after at least one write.
    #[error("Chat partially persisted, failed at {stage}: {source}")]
    PartialFailure {
        conversation_id: String,
        conversation_created: bool,
        user_message_id: Option<String>,
        stage: ChatStage,
        #[source]
        source: StepError,
    },
}

impl ChatError {
    /// True when a retry could succeed and nothing was written.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ChatError::Failed {
                source: StepError::Store(e),
                ..
            } if e.is_retryable()
        )
    }
}

/// Writes made so far in the current turn.
#[derive(Default)]
struct Progress {
    conversation_id: String,
    conversation_created: bool,
    user_message_id: Option<String>,
}

impl Progress {
    fn fail(&mut self, stage: ChatStage, source: impl Into<StepError>) -> ChatError {
        let source = source.into();

        // A failed read-back still leaves the record behind.
        if let StepError::Store(e) = &source
            && let Some(id) = e.stored_id()
        {
            match stage {
                ChatStage::CreateConversation => {
                    self.conversation_id = id.to_string();
                    self.conversation_created = true;
                }
                ChatStage::StoreUserMessage => self.user_message_id = Some(id.to_string()),
                _ => {}
            }
        }

        if !self.conversation_created && self.user_message_id.is_none() {
            return ChatError::Failed { stage, source };
        }

        error!(
            conversation_id = %self.conversation_id,
            conversation_created = self.conversation_created,
            user_message_id = ?self.user_message_id,
            %stage,
            "chat turn partially persisted: {source}"
        );
        ChatError::PartialFailure {
            conversation_id: self.conversation_id.clone(),
            conversation_created: self.conversation_created,
            user_message_id: self.user_message_id.clone(),
            stage,
            source,
        }
    }
}

/// Runs chat turns against an injected store and reply generator.
#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn DocumentStore>,
    generator: Arc<dyn ReplyGenerator>,
}

impl ChatService {
    pub fn new(store: Arc<dyn DocumentStore>, generator: Arc<dyn ReplyGenerator>) -> Self {
        Self { store, generator }
    }

    /// Run one turn. See the module docs for ordering and failure reporting.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatOutcome, ChatError> {
        check_length("message", &request.message, 1, None)?;
        // An empty id means none was supplied.
        let requested = request.conversation_id.filter(|id| !id.is_empty());
        if let Some(id) = &requested {
            check_text("conversation_id", id)?;
        }
        let preset = request
            .preset_id
            .as_deref()
            .map(|name| {
                presets::find(name)
                    .ok_or_else(|| ValidationError::new("preset_id", "must name a built-in preset"))
            })
            .transpose()?;

        let store = self.store.as_ref();
        let mut progress = Progress::default();

        let history = match requested {
            Some(id) => {
                let history = self
                    .load_history(&id)
                    .await
                    .map_err(|source| ChatError::Failed {
                        stage: ChatStage::LoadHistory,
                        source: source.into(),
                    })?;
                progress.conversation_id = id;
                history
            }
            None => {
                let conversation = insert_conversation(store, &ConversationDraft::untitled())
                    .await
                    .map_err(|e| progress.fail(ChatStage::CreateConversation, e))?;
                info!(conversation_id = %conversation.id, "opened conversation for chat");
                progress.conversation_id = conversation.id;
                progress.conversation_created = true;
                Vec::new()
            }
        };
        let conversation_id = progress.conversation_id.clone();

        let user = insert_message(store, &MessageDraft::user(&conversation_id, &request.message))
            .await
            .map_err(|e| progress.fail(ChatStage::StoreUserMessage, e))?;
        progress.user_message_id = Some(user.id.clone());
        info!(%conversation_id, message_id = %user.id, "stored user message");

        let reply = self
            .generator
            .generate(ReplyRequest {
                history: &history,
                user_message: &request.message,
                preset,
            })
            .await
            .map_err(|e| progress.fail(ChatStage::GenerateReply, e))?;

        let assistant = insert_message(
            store,
            &MessageDraft::assistant(&conversation_id, &reply.content, &reply.model, reply.tokens),
        )
        .await
        .map_err(|e| progress.fail(ChatStage::StoreAssistantMessage, e))?;
        info!(
            %conversation_id,
            message_id = %assistant.id,
            generator = self.generator.name(),
            "stored assistant message"
        );

        Ok(ChatOutcome {
            conversation_id,
            reply: assistant.content,
            timestamp: Utc::now(),
        })
    }

    /// Prior messages of a conversation, oldest first.
    async fn load_history(&self, conversation_id: &str) -> Result<Vec<Message>, StoreError> {
        let mut history =
            list_messages(self.store.as_ref(), Some(conversation_id), HISTORY_LIMIT).await?;
        history.reverse();
        Ok(history)
    }
}
