use api::app::App;
use api::config::Config;
use api::http::server::ApiError;
use clap::Parser;

use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // JSON logs, level from RUST_LOG (e.g. RUST_LOG=api=debug,gighub_core=debug)
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Only fills variables missing from the environment
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env file from: {:?}", path);
    } else {
        info!("No .env file found, using system environment variables");
    }

    let config: Config = Config::parse();
    trace!("...config and env vars loaded.");
    let app = App::new(config).await?;
    info!("Starting GigHub API");
    app.start().await?;
    Ok(())
}
