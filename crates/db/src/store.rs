use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::PersistenceError;
use crate::schema::CollectionSchema;

/// Field name carrying the server-assigned identifier.
pub const ID_FIELD: &str = "_id";

/// A stored record: server-assigned identifier plus its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Storage engine behind a [`crate::Database`] handle.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Define (or redefine) a collection
    async fn define(&self, schema: CollectionSchema) -> Result<(), PersistenceError>;

    /// Schemas of all defined collections, sorted by collection name
    async fn schemas(&self) -> Vec<CollectionSchema>;

    /// Validate `fields` against the collection schema and persist a new document
    async fn create(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, PersistenceError>;

    /// Number of documents stored in a collection
    async fn count(&self, collection: &str) -> Result<usize, PersistenceError>;

    /// Release the engine. Later calls fail with [`PersistenceError::Closed`].
    async fn close(&self);
}

#[derive(Default)]
struct Collections {
    schemas: HashMap<String, CollectionSchema>,
    documents: HashMap<String, Vec<Document>>,
    closed: bool,
}

/// Process-local engine used for `memory://` endpoints.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn define(&self, schema: CollectionSchema) -> Result<(), PersistenceError> {
        let mut inner = self.inner.write().await;
        if inner.closed {
            return Err(PersistenceError::Closed);
        }

        let name = schema.collection.to_string();
        inner.documents.entry(name.clone()).or_default();
        inner.schemas.insert(name, schema);
        Ok(())
    }

    async fn schemas(&self) -> Vec<CollectionSchema> {
        let inner = self.inner.read().await;
        let mut schemas: Vec<_> = inner.schemas.values().cloned().collect();
        schemas.sort_by_key(|schema| schema.collection);
        schemas
    }

    async fn create(
        &self,
        collection: &str,
        mut fields: Map<String, Value>,
    ) -> Result<Document, PersistenceError> {
        let mut inner = self.inner.write().await;
        if inner.closed {
            return Err(PersistenceError::Closed);
        }

        let schema = inner
            .schemas
            .get(collection)
            .ok_or_else(|| PersistenceError::UnknownCollection(collection.to_string()))?;

        // Identity is always server-assigned.
        fields.remove(ID_FIELD);

        let fields = schema
            .validate(fields)
            .map_err(|violations| PersistenceError::Validation {
                model: schema.model.to_string(),
                violations,
            })?;

        let document = Document {
            id: Uuid::now_v7().simple().to_string(),
            fields,
        };

        inner
            .documents
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn count(&self, collection: &str) -> Result<usize, PersistenceError> {
        let inner = self.inner.read().await;
        if inner.closed {
            return Err(PersistenceError::Closed);
        }

        inner
            .documents
            .get(collection)
            .map(Vec::len)
            .ok_or_else(|| PersistenceError::UnknownCollection(collection.to_string()))
    }

    async fn close(&self) {
        let mut inner = self.inner.write().await;
        inner.closed = true;
        inner.documents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldRule;
    use serde_json::json;

    async fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .define(
                CollectionSchema::new("books", "Book")
                    .field(FieldRule::string("title").required()),
            )
            .await
            .unwrap();
        store
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn create_assigns_distinct_identifiers() {
        let store = store().await;

        let first = store.create("books", fields(json!({"title": "Dune"}))).await.unwrap();
        let second = store.create("books", fields(json!({"title": "Dune"}))).await.unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(store.count("books").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn caller_supplied_id_is_ignored() {
        let store = store().await;

        let doc = store
            .create("books", fields(json!({"_id": "mine", "title": "Dune"})))
            .await
            .unwrap();

        assert_ne!(doc.id, "mine");
        assert!(!doc.fields.contains_key(ID_FIELD));
    }

    #[tokio::test]
    async fn document_serializes_identifier_as_underscore_id() {
        let store = store().await;
        let doc = store.create("books", fields(json!({"title": "Dune"}))).await.unwrap();

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["_id"], json!(doc.id));
        assert_eq!(value["title"], json!("Dune"));
    }

    #[tokio::test]
    async fn validation_failure_writes_nothing() {
        let store = store().await;

        let err = store.create("books", Map::new()).await.unwrap_err();

        assert!(matches!(err, PersistenceError::Validation { .. }));
        assert_eq!(store.count("books").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_collection_is_rejected() {
        let store = store().await;

        let err = store.create("films", Map::new()).await.unwrap_err();

        assert_eq!(err, PersistenceError::UnknownCollection("films".to_string()));
    }

    #[tokio::test]
    async fn closed_store_rejects_writes() {
        let store = store().await;
        store.close().await;

        let err = store
            .create("books", fields(json!({"title": "Dune"})))
            .await
            .unwrap_err();

        assert_eq!(err, PersistenceError::Closed);
    }
}
