//! Request and response bodies that exist only at the HTTP boundary.
//!
//! Entity bodies (`Conversation`, `Message`, `Preset`, chat request/outcome)
//! are the `muse_core` types themselves.

use muse_core::models::Conversation;
use serde::{Deserialize, Serialize};

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Conversation left behind by a partially persisted chat turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// `?limit=` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// `GET /messages` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageListQuery {
    pub conversation_id: Option<String>,
    pub limit: Option<i64>,
}

/// `GET /test` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<Vec<Conversation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
