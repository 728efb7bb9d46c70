//! Application bootstrap: database, module lifecycle, and HTTP serving.

use anyhow::Context;
use axum::Router;
use trove_db::Database;
use trove_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// A migrated, started application that has not bound a socket yet.
pub struct App {
    pub settings: Settings,
    pub db: Database,
    pub registry: ModuleRegistry,
}

impl App {
    /// Connect the database, apply migrations, then init and start every module.
    pub async fn bootstrap(settings: Settings) -> anyhow::Result<Self> {
        let db = Database::connect(&settings.database.endpoint, &settings.database.name)
            .with_context(|| {
                format!(
                    "failed to connect to database at '{}'",
                    settings.database.endpoint
                )
            })?;

        let registry = build_registry(&db);
        registry.apply_migrations(&db).await?;

        let ctx = InitCtx {
            settings: &settings,
            db: &db,
        };
        registry.init_modules(&ctx).await?;
        registry.start_modules(&ctx).await?;

        tracing::info!(
            modules = registry.module_count(),
            "trove bootstrap complete"
        );

        Ok(Self {
            settings,
            db,
            registry,
        })
    }

    /// Router serving every module plus the service-level routes.
    pub fn router(&self) -> Router {
        trove_http::build_router(&self.registry, &self.settings)
    }

    /// Stop modules in reverse order, then close the database.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        let stopped = self.registry.stop_modules().await;
        self.db.close().await;
        stopped
    }
}

/// Registry with every resource module bound to `db`.
pub fn build_registry(db: &Database) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, db);
    registry
}

/// Run the service until Ctrl+C or SIGTERM.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let app = App::bootstrap(settings).await?;

    let served =
        trove_http::start_server(&app.registry, &app.settings, trove_http::shutdown_signal()).await;
    let shut_down = app.shutdown().await;

    served?;
    shut_down
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_every_resource() {
        let registry = build_registry(&Database::in_memory());

        let mounts: Vec<String> = registry.modules().iter().map(|m| m.mount_path()).collect();
        assert_eq!(mounts, vec!["/books", "/jobs", "/api/products"]);
    }

    #[tokio::test]
    async fn bootstrap_defines_collections() {
        let app = App::bootstrap(Settings::default()).await.unwrap();

        for collection in ["books", "jobs", "products"] {
            assert!(app.db.has_collection(collection).await);
        }

        app.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn every_module_runs_start_and_stop_hooks() {
        let settings = Settings::default();
        let db = Database::in_memory();
        let registry = build_registry(&db);
        registry.apply_migrations(&db).await.unwrap();
        let ctx = InitCtx {
            settings: &settings,
            db: &db,
        };

        for module in registry.modules() {
            module.init(&ctx).await.unwrap();
            module.start(&ctx).await.unwrap();
            module.stop().await.unwrap();
        }
    }

    #[tokio::test]
    async fn bootstrap_fails_on_unsupported_endpoint() {
        let mut settings = Settings::default();
        settings.database.endpoint = "mongodb://localhost:27017".to_string();

        let err = App::bootstrap(settings).await.err().unwrap();
        assert!(err.to_string().contains("failed to connect to database"));
    }
}
