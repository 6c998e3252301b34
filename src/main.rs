use std::path::PathBuf;

use anyhow::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use naniwa_weather::config::BotConfig;
use naniwa_weather::run;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional config file path as the only argument.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = BotConfig::load(config_path.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    if let Err(e) = run::run(&config).await {
        error!("run aborted: {e:#}");
        return Err(e);
    }
    Ok(())
}
