pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use trove_db::Database;
use trove_kernel::{InitCtx, Migration, Module};

use crate::utils;

/// Products resource, mounted at the default `/api/products`
pub struct ProductsModule {
    db: Database,
}

impl ProductsModule {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Module for ProductsModule {
    fn name(&self) -> &'static str {
        "products"
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
            "products module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.db.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let mut new_product = utils::document_component(&models::schema());
        if let Some(properties) = new_product["properties"].as_object_mut() {
            properties.remove(trove_db::ID_FIELD);
        }
        new_product["required"] = json!([]);

        Some(json!({
            "paths": utils::resource_paths(
                "Products",
                "Product",
                "NewProduct",
                "ProductCreateFailure"
            ),
            "components": {
                "schemas": {
                    "Product": utils::document_component(&models::schema()),
                    "NewProduct": new_product,
                    "ProductCreateFailure": utils::failure_component(false)
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
        tracing::info!(module = self.name(), "products module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "products module stopped");
        Ok(())
    }
}

/// Create a new instance of the products module
pub fn create_module(db: Database) -> Arc<dyn Module> {
    Arc::new(ProductsModule::new(db))
}
