//! # muse_api
//!
//! HTTP API library for Muse.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use muse_core::chat::ChatService;
use muse_core::reply::ReplyGenerator;
use muse_core::store::DocumentStore;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{chat, conversations, health, messages, presets};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle, shared by every request.
    pub store: Arc<dyn DocumentStore>,
    /// Chat orchestrator over the same store.
    pub chat: ChatService,
}

impl AppState {
    /// Wire the chat orchestrator to `store` and `generator`.
    pub fn new(store: Arc<dyn DocumentStore>, generator: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            chat: ChatService::new(store.clone(), generator),
            store,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/test", get(health::health_handler))
        .route(
            "/conversations",
            get(conversations::list_conversations_handler)
                .post(conversations::create_conversation_handler),
        )
        .route(
            "/messages",
            get(messages::list_messages_handler).post(messages::create_message_handler),
        )
        .route("/chat", post(chat::chat_handler))
        .route("/presets", get(presets::list_presets_handler))
        .layer(cors)
        .with_state(state)
}
