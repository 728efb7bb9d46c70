//! Document persistence for trove.
//!
//! [`Database`] is the handle the rest of the workspace talks to. It is opened
//! once at process start, cloned into whatever needs it, and closed on
//! shutdown. Writes are validated against the collection's
//! [`CollectionSchema`] before they are stored.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

pub mod error;
pub mod schema;
pub mod store;

pub use error::PersistenceError;
pub use schema::{CollectionSchema, FieldKind, FieldRule, FieldViolation};
pub use store::{Document, DocumentStore, MemoryStore, ID_FIELD};

/// Shared handle to the document store.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
    name: Arc<str>,
}

impl Database {
    /// Open the store behind `endpoint`. Only `memory://` is supported.
    pub fn connect(endpoint: &str, name: &str) -> Result<Self, PersistenceError> {
        let store: Arc<dyn DocumentStore> = match endpoint.split_once("://") {
            Some(("memory", _)) => Arc::new(MemoryStore::new()),
            _ => return Err(PersistenceError::UnsupportedEndpoint(endpoint.to_string())),
        };

        tracing::info!(target: "trove-db", endpoint, database = name, "database connected");

        Ok(Self::with_store(store, name))
    }

    /// Wrap an already constructed engine.
    pub fn with_store(store: Arc<dyn DocumentStore>, name: &str) -> Self {
        Self {
            store,
            name: Arc::from(name),
        }
    }

    /// Fresh in-memory database.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), "memory")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Define a collection from its schema.
    pub async fn apply(&self, schema: CollectionSchema) -> Result<(), PersistenceError> {
        tracing::debug!(
            target: "trove-db",
            collection = schema.collection,
            fields = schema.fields.len(),
            strict = schema.strict,
            "defining collection"
        );
        self.store.define(schema).await
    }

    pub async fn schemas(&self) -> Vec<CollectionSchema> {
        self.store.schemas().await
    }

    pub async fn has_collection(&self, collection: &str) -> bool {
        self.store
            .schemas()
            .await
            .iter()
            .any(|schema| schema.collection == collection)
    }

    /// Persist a new document in `collection`.
    pub async fn create(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, PersistenceError> {
        self.store.create(collection, fields).await
    }

    pub async fn count(&self, collection: &str) -> Result<usize, PersistenceError> {
        self.store.count(collection).await
    }

    pub async fn close(&self) {
        self.store.close().await;
        tracing::info!(target: "trove-db", database = %self.name, "database connection closed");
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_accepts_memory_endpoint() {
        let db = Database::connect("memory://", "trove").unwrap();
        assert_eq!(db.name(), "trove");
    }

    #[test]
    fn connect_rejects_unknown_scheme() {
        let err = Database::connect("mongodb://localhost:27017", "trove").unwrap_err();
        assert_eq!(
            err,
            PersistenceError::UnsupportedEndpoint("mongodb://localhost:27017".to_string())
        );
    }

    #[tokio::test]
    async fn clones_share_one_store() {
        let db = Database::in_memory();
        db.apply(CollectionSchema::new("jobs", "Job")).await.unwrap();

        let clone = db.clone();
        clone.create("jobs", Map::new()).await.unwrap();

        assert!(db.has_collection("jobs").await);
        assert_eq!(db.count("jobs").await.unwrap(), 1);
    }
}
