//! # muse_core
//!
//! Core domain logic for Muse: document persistence, entity validation,
//! the preset catalog and chat-turn orchestration.

pub mod chat;
pub mod conversations;
pub mod models;
pub mod presets;
pub mod reply;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
