//! In-process document store.
//!
//! Same contract as the PostgreSQL store, held in a map behind one lock.
//! Backs the test suites and the server's `--memory` mode.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Document, DocumentStore, Fields, Filter, StoreError, new_id, now, strip_reserved};

/// Document store that keeps every collection in memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn matches(doc: &Document, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(key, expected)| doc.fields.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let ts = now();
        let id = new_id().to_string();
        let doc = Document {
            id: id.clone(),
            fields: strip_reserved(fields),
            created_at: ts,
            updated_at: ts,
        };

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        docs.push(doc);

        let stored = docs
            .iter()
            .rev()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| StoreError::read_back(&id, "not found after insert"))?;

        debug!(collection, %id, "document created");
        Ok(stored)
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        // Newest insert first; the stable sort keeps that order among equal timestamps.
        let mut found: Vec<Document> = docs
            .iter()
            .rev()
            .filter(|d| matches(d, filter))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(limit);

        debug!(collection, count = found.len(), "documents queried");
        Ok(found)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{filter_eq, to_fields};
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        to_fields(&value).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_id_and_equal_timestamps() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .create("conversation", fields(json!({"title": "Hello"})))
            .await
            .unwrap();

        assert!(!doc.id.is_empty());
        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(doc.fields["title"], "Hello");
        assert_eq!(store.count("conversation").await, 1);
    }

    #[tokio::test]
    async fn client_supplied_timestamps_and_ids_are_ignored() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .create(
                "conversation",
                fields(json!({
                    "id": "mine",
                    "created_at": "2000-01-01T00:00:00Z",
                    "title": "Hello",
                })),
            )
            .await
            .unwrap();

        assert_ne!(doc.id, "mine");
        assert!(doc.created_at.timestamp() > 946_684_800);
        assert!(!doc.fields.contains_key("created_at"));
    }

    #[tokio::test]
    async fn query_returns_newest_first() {
        let store = MemoryDocumentStore::new();
        for title in ["a", "b", "c"] {
            store
                .create("conversation", fields(json!({"title": title})))
                .await
                .unwrap();
        }

        let docs = store
            .query("conversation", &Filter::new(), 10)
            .await
            .unwrap();
        let titles: Vec<_> = docs.iter().map(|d| d.fields["title"].clone()).collect();
        assert_eq!(titles, vec![json!("c"), json!("b"), json!("a")]);
    }

    #[tokio::test]
    async fn query_applies_filter_and_limit() {
        let store = MemoryDocumentStore::new();
        for (conv, text) in [("x", "1"), ("y", "2"), ("x", "3"), ("x", "4")] {
            store
                .create(
                    "message",
                    fields(json!({"conversation_id": conv, "content": text})),
                )
                .await
                .unwrap();
        }

        let docs = store
            .query("message", &filter_eq("conversation_id", "x"), 2)
            .await
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.fields["conversation_id"] == "x"));
        assert_eq!(docs[0].fields["content"], "4");
    }

    #[tokio::test]
    async fn unknown_collection_is_empty_not_an_error() {
        let store = MemoryDocumentStore::new();
        let docs = store.query("nothing", &Filter::new(), 5).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn zero_limit_returns_nothing() {
        let store = MemoryDocumentStore::new();
        store
            .create("conversation", fields(json!({"title": "a"})))
            .await
            .unwrap();
        let docs = store
            .query("conversation", &Filter::new(), 0)
            .await
            .unwrap();
        assert!(docs.is_empty());
    }
}
