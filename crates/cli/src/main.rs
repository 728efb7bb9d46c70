use std::fmt::{self, Write as _};

use anyhow::Context;
use clap::{Parser, Subcommand};
use trove_db::Database;
use trove_kernel::{settings::Settings, ModuleRegistry};

#[derive(Debug, Parser)]
#[command(name = "trove", version, about = "Book, job, and product resource service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service until Ctrl+C or SIGTERM
    Serve,
    /// Print the merged OpenAPI document
    Openapi {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the collection schemas every module migrates
    Schemas,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            let settings = Settings::load().with_context(|| "failed to load trove settings")?;
            trove_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "trove serve starting");
            trove_app::app::run(settings).await
        }
        Command::Openapi { pretty } => {
            let registry = offline_registry();
            let document = trove_http::router::openapi_document(&registry);
            let rendered = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{}", rendered);
            Ok(())
        }
        Command::Schemas => {
            print!("{}", render_schemas(&offline_registry())?);
            Ok(())
        }
    }
}

/// Registry bound to a throwaway store; enough to inspect routes and migrations.
fn offline_registry() -> ModuleRegistry {
    trove_app::app::build_registry(&Database::in_memory())
}

fn render_schemas(registry: &ModuleRegistry) -> Result<String, fmt::Error> {
    let mut out = String::new();

    for (module, migration) in registry.collect_migrations() {
        let schema = &migration.schema;
        writeln!(
            out,
            "{} ({}, {}) [{}:{}]",
            schema.collection,
            schema.model,
            if schema.strict { "strict" } else { "open" },
            module,
            migration.id
        )?;

        for rule in &schema.fields {
            let mut line = format!("  {}: {}", rule.name, rule.kind.label());
            if rule.required {
                line.push_str(", required");
            }
            if let Some(min) = rule.min {
                write!(line, ", min {}", min)?;
            }
            if let Some(default) = &rule.default {
                write!(line, ", default {}", default)?;
            }
            writeln!(out, "{}", line)?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn renders_product_schema() {
        let rendered = render_schemas(&offline_registry()).unwrap();

        assert!(rendered.contains("products (Product, strict) [products:001_init]"));
        assert!(rendered.contains("  price: Number, required, min 0"));
        assert!(rendered.contains("  stockQuantity: Integer, min 0, default 0"));
        assert!(rendered.contains("  category: String\n"));
        assert!(rendered.contains("books (Book, open) [books:001_init]"));
    }
}
