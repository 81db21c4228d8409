//! Domain entities and their input validators.
//!
//! Raw `New*` / `*Input` types come straight from callers; `validate()`
//! either yields a value that is safe to persist or a `ValidationError`
//! naming the offending field. Validators never touch the store.

pub mod conversation;
pub mod message;
pub mod preset;

pub use conversation::{Conversation, ConversationDraft, NewConversation};
pub use message::{Message, MessageDraft, NewMessage, Role};
pub use preset::{Preset, PresetInput};

use thiserror::Error;

/// Input rejected before it reached the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {rule}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    /// The constraint it broke.
    pub rule: String,
}

impl ValidationError {
    pub fn new(field: &'static str, rule: impl Into<String>) -> Self {
        Self {
            field,
            rule: rule.into(),
        }
    }
}

/// Reject text the store cannot hold. JSONB strings may not contain U+0000.
pub(crate) fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::new(field, "must not contain NUL characters"));
    }
    Ok(())
}

/// Check a string's length in characters against `min..=max`, then its content.
pub(crate) fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::new(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    if let Some(max) = max
        && len > max
    {
        return Err(ValidationError::new(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    check_text(field, value)
}
