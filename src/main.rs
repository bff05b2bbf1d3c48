use std::error::Error;

use ai_llm_service::telemetry;
use tracing::{Level, info, warn};
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine: every variable can also come from the process env.
    let dotenv = dotenvy::dotenv();

    let filter = telemetry::env_filter_with_level("info", Level::INFO);

    // The LLM crate renders its own events through `telemetry::layer`.
    let app_layer = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| {
            !meta.target().starts_with(telemetry::TARGET_PREFIX)
        }));

    tracing_subscriber::registry()
        .with(filter)
        .with(app_layer)
        .with(telemetry::layer())
        .try_init()?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "failed to read .env file"),
    }

    api::start().await?;

    Ok(())
}
