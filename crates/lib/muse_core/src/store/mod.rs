//! Document store adapter.
//!
//! Collections of flat JSON documents keyed by a store-generated identifier.
//! Every record handed back to callers carries that identifier under `id`;
//! the native row key never leaves the adapter.
//!
//! The adapter is an explicit handle (`Arc<dyn DocumentStore>`) constructed
//! once at startup and injected into every component that needs it.

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Collection holding conversations.
pub const CONVERSATIONS: &str = "conversation";

/// Collection holding messages.
pub const MESSAGES: &str = "message";

/// Caller-supplied document body.
pub type Fields = Map<String, Value>;

/// Equality filter on top-level fields. Empty matches everything.
pub type Filter = Map<String, Value>;

/// Keys owned by the store. Stripped from caller-supplied fields on insert.
const RESERVED_KEYS: &[&str] = &["id", "_id", "created_at", "updated_at"];

/// Errors raised by document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid store configuration: {0}")]
    Configuration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The insert went through; reading the stored record back did not.
    #[error("Document {id} was stored but could not be read back: {reason}")]
    ReadBack { id: String, reason: String },
}

impl StoreError {
    /// Failure after `id` was already written.
    pub fn read_back(id: impl ToString, reason: impl fmt::Display) -> Self {
        StoreError::ReadBack {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Transport-level failures may succeed on retry; everything else won't.
    /// A failed read-back is never retryable: the record already exists.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }

    /// Id of a record this failed call nevertheless wrote.
    pub fn stored_id(&self) -> Option<&str> {
        match self {
            StoreError::ReadBack { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
            sqlx::Error::Configuration(_) => StoreError::Configuration(e.to_string()),
            _ => StoreError::Query(e.to_string()),
        }
    }
}

/// A stored record as seen by callers.
///
/// Serializes flat: `{"id": ..., <fields>, "created_at": ..., "updated_at": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Decode the document into a typed entity.
    pub fn into_entity<T: DeserializeOwned>(self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }
}

/// Generic create/query primitives over named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `fields` stamped with `created_at == updated_at == now` and
    /// return the stored record, read back from the store.
    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StoreError>;

    /// Up to `limit` records matching `filter`, newest `created_at` first.
    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError>;

    /// Round-trip to the backend without touching any collection.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Backend identifier for logging.
    fn backend(&self) -> &'static str;
}

/// Serialize a value into document fields. Fails unless it is a JSON object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Query(format!(
            "document body must be an object, got {other}"
        ))),
    }
}

/// Single-key equality filter.
pub fn filter_eq(key: &str, value: impl Into<Value>) -> Filter {
    let mut filter = Filter::new();
    filter.insert(key.to_string(), value.into());
    filter
}

/// Drop store-owned keys from caller-supplied fields.
pub(crate) fn strip_reserved(mut fields: Fields) -> Fields {
    for key in RESERVED_KEYS {
        fields.remove(*key);
    }
    fields
}

/// Fresh document identifier. UUIDv7 sorts by creation time, which breaks
/// ties between documents stamped with the same microsecond.
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

/// Insert timestamp, truncated to the microsecond precision PostgreSQL keeps.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
