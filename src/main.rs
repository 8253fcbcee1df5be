use anyhow::{Context, Result};
use calc_pages::config::Config;
use calc_pages::locator::StaticModuleSource;
use calc_pages::registry::CalculatorRegistry;
use calc_pages::server::{router, AppState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("calc_pages=info".parse()?),
        )
        .init();

    info!("Starting calculator pages service");

    // Load configuration from environment
    let config = Config::from_env()?;

    let registry = match &config.registry_file {
        Some(path) => CalculatorRegistry::from_file(path)
            .with_context(|| format!("Failed to load registry from {}", path.display()))?,
        None => CalculatorRegistry::embedded().context("Embedded registry is invalid")?,
    };

    let state = AppState::from_config(Arc::new(registry), Arc::new(StaticModuleSource), &config);
    let app = router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {} (public URL {})", addr, config.public_base_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
