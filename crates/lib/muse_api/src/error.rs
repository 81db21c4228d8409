//! Application error types.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use muse_core::chat::{ChatError, StepError};
use muse_core::conversations::ConversationError;
use muse_core::models::ValidationError;
use muse_core::store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The record was written but could not be confirmed. Not retryable.
    #[error("Write unconfirmed: {0}")]
    WriteUnconfirmed(String),

    #[error("Chat partially persisted: {message}")]
    PartialFailure {
        conversation_id: String,
        message: String,
    },

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, conversation_id) = match self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m, None),
            AppError::StoreUnavailable(m) => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", m, None)
            }
            AppError::WriteUnconfirmed(m) => {
                error!("write unconfirmed: {m}");
                (StatusCode::INTERNAL_SERVER_ERROR, "write_unconfirmed", m, None)
            }
            AppError::PartialFailure {
                conversation_id,
                message,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "partial_failure",
                message,
                Some(conversation_id),
            ),
            AppError::Internal(m) => {
                error!("internal error: {m}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
            conversation_id,
        });
        (status, body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        if e.is_retryable() {
            AppError::StoreUnavailable(e.to_string())
        } else if e.stored_id().is_some() {
            AppError::WriteUnconfirmed(e.to_string())
        } else {
            AppError::Internal(e.to_string())
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<ConversationError> for AppError {
    fn from(e: ConversationError) -> Self {
        match e {
            ConversationError::Validation(v) => AppError::from(v),
            ConversationError::Store(s) => AppError::from(s),
        }
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        let message = e.to_string();
        match e {
            ChatError::Validation(v) => AppError::from(v),
            ChatError::Failed {
                source: StepError::Store(s),
                ..
            } => AppError::from(s),
            ChatError::Failed { .. } => AppError::Internal(message),
            ChatError::PartialFailure {
                conversation_id, ..
            } => AppError::PartialFailure {
                conversation_id,
                message,
            },
        }
    }
}
