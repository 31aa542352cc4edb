// Stock price tracker entry point.
// Usage: gui [config.json]   (RUST_LOG controls log filtering)

mod app;
mod components;
mod config;
mod services;
mod state;

use components::chart::JsonLinesSurface;
use config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the chart payloads.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let app_config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::load_default()?,
    };
    tracing::info!("Loaded configuration version {}", app_config.version);

    let mut surface = JsonLinesSurface::new(std::io::stdout());
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    app::run(app_config, &mut surface, shutdown).await
}
