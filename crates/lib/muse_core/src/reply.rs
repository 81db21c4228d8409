//! Reply generation.
//!
//! The chat orchestrator depends only on [`ReplyGenerator`]; the built-in
//! [`ScriptedReplyGenerator`] answers every turn with the same sentence.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Message, Preset};

/// Errors a generator may report.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("Reply generator unavailable: {0}")]
    Unavailable(String),
}

/// Input handed to a generator for one chat turn.
#[derive(Debug, Clone, Copy)]
pub struct ReplyRequest<'a> {
    /// Earlier messages of the conversation, oldest first.
    pub history: &'a [Message],
    pub user_message: &'a str,
    pub preset: Option<&'a Preset>,
}

/// A generated reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    /// Label identifying the generator, stored on the assistant message.
    pub model: String,
    pub tokens: u64,
}

/// Produces assistant replies.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, request: ReplyRequest<'_>) -> Result<Reply, ReplyError>;

    /// Generator identifier for logging.
    fn name(&self) -> &str;
}

pub const SCRIPTED_MODEL: &str = "mock-model";

pub const SCRIPTED_REPLY: &str = "Let's make something beautiful. Here's a spark: imagine your \
     idea as light through a lens. What do you want it to reveal?";

const SCRIPTED_TOKENS: u64 = 24;

/// Generator that always returns [`SCRIPTED_REPLY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedReplyGenerator;

#[async_trait]
impl ReplyGenerator for ScriptedReplyGenerator {
    async fn generate(&self, _request: ReplyRequest<'_>) -> Result<Reply, ReplyError> {
        Ok(Reply {
            content: SCRIPTED_REPLY.to_string(),
            model: SCRIPTED_MODEL.to_string(),
            tokens: SCRIPTED_TOKENS,
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
