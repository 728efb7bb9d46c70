use anyhow::Context;
use trove_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load trove settings")?;
    trove_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.endpoint,
        "trove bootstrap starting"
    );

    trove_app::app::run(settings).await
}
