mod config;
mod error;
mod routes;
mod service;

use std::sync::Arc;

use config::ServerConfig;
use service::AppState;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttlkv_core::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttlkv_server=info,ttlkv_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let addr = format!("{}:{}", config.host, config.port);

    let store = Store::with_config(config.store_config());
    let app = routes::create_router(Arc::new(AppState::new(store.clone())))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("ttlkv HTTP server listening on {}", addr);
    tracing::info!("   Sweep interval: {}ms", config.sweep_interval_ms);
    tracing::info!("   Snapshot file: {}", config.snapshot_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown();
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
