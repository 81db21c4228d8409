//! PostgreSQL-backed document store.
//!
//! Every collection lives in the single `documents` table; the document body
//! is a JSONB column and filters are evaluated with JSONB containment.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::debug;
use uuid::Uuid;

use super::{Document, DocumentStore, Fields, Filter, StoreError, new_id, now, strip_reserved};

/// Maximum time to wait for a pooled connection before reporting the store
/// as unavailable.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw row as stored. Never leaves this module.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Map a stored row to the caller-facing record.
fn into_document(row: DocumentRow) -> Result<Document, StoreError> {
    let fields = match row.body {
        Value::Object(map) => strip_reserved(map),
        other => {
            return Err(StoreError::Query(format!(
                "document {} has a non-object body: {other}",
                row.id
            )));
        }
    };

    Ok(Document {
        id: row.id.to_string(),
        fields,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Document store over a shared PostgreSQL pool.
#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Build a store whose pool connects on first use.
    ///
    /// `database_name` overrides whatever database the URL names.
    pub fn connect_lazy(
        url: &str,
        database_name: &str,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let options = PgConnectOptions::from_str(url)?.database(database_name);
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `documents` table and its indexes if missing.
    ///
    /// Migrations are embedded from `muse_core/migrations/`.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let id = new_id();
        let ts = now();
        let body = Value::Object(strip_reserved(fields));

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            "#,
        )
        .bind(id)
        .bind(collection)
        .bind(&body)
        .bind(ts)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body, created_at, updated_at
            FROM documents
            WHERE id = $1 AND collection = $2
            "#,
        )
        .bind(id)
        .bind(collection)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::read_back(id, StoreError::from(e)))?
        .ok_or_else(|| StoreError::read_back(id, "not found after insert"))?;

        debug!(collection, %id, "document created");
        into_document(row).map_err(|e| StoreError::read_back(id, e))
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(collection)
        .bind(Value::Object(filter.clone()))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        debug!(collection, count = rows.len(), "documents queried");
        rows.into_iter().map(into_document).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
