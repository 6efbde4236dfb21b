use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use formbuilder::config::Config;
use formbuilder::db;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;

    // RUST_LOG wins over the configured level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let pool = db::connect(&config).await?;
    db::migrate(&pool).await?;
    tracing::info!(environment = ?config.environment, "Database ready");

    let listener = TcpListener::bind(SocketAddr::new(config.host, config.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "Form builder listening");

    let app = formbuilder::build_app(pool, config)
        .into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(stop_requested())
        .await?;

    tracing::info!("Form builder stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix. A handler that cannot be
/// installed never fires instead of aborting the server.
async fn stop_requested() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl+C handler unavailable: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM handler unavailable: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => tracing::info!("Interrupt received, draining connections"),
        _ = terminate => tracing::info!("SIGTERM received, draining connections"),
    }
}
