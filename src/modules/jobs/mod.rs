pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use trove_db::Database;
use trove_kernel::{InitCtx, Migration, Module};

use crate::utils;

/// Job postings resource, mounted at `/jobs`
pub struct JobsModule {
    db: Database,
}

impl JobsModule {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Module for JobsModule {
    fn name(&self) -> &'static str {
        "jobs"
    }

    fn mount_path(&self) -> String {
        "/jobs".to_string()
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
            "jobs module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.db.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": utils::resource_paths("Jobs", "Job", "NewJob", "JobCreateFailure"),
            "components": {
                "schemas": {
                    "Job": utils::document_component(&models::schema()),
                    "NewJob": {
                        "type": "object",
                        "description": "Any JSON object; every field is forwarded to the store",
                        "additionalProperties": true
                    },
                    "JobCreateFailure": utils::failure_component(true)
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
        tracing::info!(module = self.name(), "jobs module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "jobs module stopped");
        Ok(())
    }
}

/// Create a new instance of the jobs module
pub fn create_module(db: Database) -> Arc<dyn Module> {
    Arc::new(JobsModule::new(db))
}
