//! scribed server entry point.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use scribed::{config, logging, server};

/// Self-hosted web UI and relay for Deepgram speech-to-text transcription.
#[derive(Debug, Parser)]
#[command(name = "scribed", version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "scribed.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = config::ScribedConfig::load(&args.config)?;
    logging::init_logging(config.server.log_dir.as_deref())?;

    let api_key = config::api_key_from_env()?;

    tokio::fs::create_dir_all(&config.server.uploads_dir)
        .await
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to create uploads directory {}: {e}",
                config.server.uploads_dir.display()
            )
        })?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.deepgram.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

    let port = config.server.port;
    let state = server::AppState::new(config, api_key, http);
    let app = server::router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running on {addr}");
    tracing::info!("Visit http://localhost:{port} to use the transcriber");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
