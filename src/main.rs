use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use product_studio::config::AppConfig;
use product_studio::pipeline::PromptSettings;
use product_studio::routes::AppState;
use product_studio::store::{ContentStore, MemStore, PgStore};
use product_studio::{app, gateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let gateway = gateway::from_config(&config.llm).context("failed to build LLM gateway")?;

    let store: Arc<dyn ContentStore> = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url).await.context("failed to connect to database")?;
            store.migrate().await.context("failed to run database migrations")?;
            tracing::info!("Using Postgres content store");
            Arc::new(store)
        }
        None => {
            tracing::info!("Using in-memory content store");
            Arc::new(MemStore::new())
        }
    };

    let state = AppState {
        store,
        gateway,
        settings: Arc::new(PromptSettings { country_aware: config.country_aware, model: None }),
    };
    tracing::info!(country_aware = config.country_aware, "Prompt settings loaded");

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Starting server");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
