use std::net::SocketAddr;

use toolkit::{app_config, check_env_vars, ToolkitAppConfig};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolkit=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if check_env_vars() {
        error!("Some environment variables are missing!");
    }

    let bind_addr: SocketAddr = dotenvy::var("BIND_ADDR")
        .ok()
        .and_then(|addr| addr.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));

    let config = ToolkitAppConfig::from_env();
    config
        .toolkit
        .create_dir_if_not_exist(&config.upload_dir)
        .await?;

    info!("Starting toolkit on {}", bind_addr);

    let app = app_config(config);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down toolkit");
}
