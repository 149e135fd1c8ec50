use anyhow::Context;
use clap::Parser;
use todo_core::TodoStore;
use todo_server::Config;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = if config.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let store = TodoStore::open(&config.db_path)
        .await
        .with_context(|| format!("failed to open database at {}", config.db_path))?;
    info!(db_path = %config.db_path, "database initialized");

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");
    info!("API available at http://localhost:{}{}/todos", config.port, todo_server::API_PREFIX);
    info!("health check at http://localhost:{}/health", config.port);

    todo_server::run_until(listener, store.clone(), shutdown_signal()).await?;

    store.close().await;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
