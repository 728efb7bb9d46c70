pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use trove_db::Database;
use trove_kernel::{InitCtx, Migration, Module};

use crate::utils;

/// Books resource, mounted at `/books`
pub struct BooksModule {
    db: Database,
}

impl BooksModule {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    fn mount_path(&self) -> String {
        "/books".to_string()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        anyhow::ensure!(
            ctx.db.has_collection(models::COLLECTION).await,
            "collection '{}' is missing; migrations have not run",
            models::COLLECTION
        );
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.db.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": utils::resource_paths("Books", "Book", "NewBook", "BookCreateFailure"),
            "components": {
                "schemas": {
                    "Book": utils::document_component(&models::schema()),
                    "NewBook": {
                        "type": "object",
                        "description": "Any JSON object; every field is forwarded to the store",
                        "additionalProperties": true
                    },
                    "BookCreateFailure": utils::failure_component(true)
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            schema: models::schema(),
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(db: Database) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(db))
}
