// src/main.rs
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

use axum_server::Handle;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use polls::config::Config;
use polls::routes::create_routes;
use polls::{AppState, MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    if config.uses_memory_store() {
        info!("Using in-memory store");
        serve(&config, MemoryStore::new()).await
    } else {
        info!("Connecting to database...");
        let store = PgStore::connect(&config.database_url, config.max_connections).await?;
        serve(&config, store).await
    }
}

async fn serve<S: Store>(config: &Config, store: S) -> Result<(), Box<dyn Error>> {
    let app = create_routes(AppState::new(store));
    let address: SocketAddr = config.address().parse()?;

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    info!("Server running on {address}");
    axum_server::bind(address)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
