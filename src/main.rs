//! Fieldbook - Application Entry Point

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;

use fieldbook::{
    config::CONFIG,
    create_router,
    db::{self, JsonFilePersistence, Store},
    logging::init_tracing,
    services::ArchiveScheduler,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&CONFIG.server);

    tracing::info!("Starting Fieldbook server...");

    // Load the document
    tracing::info!(path = %CONFIG.storage.db_file.display(), "Opening document store...");
    let persistence = Arc::new(JsonFilePersistence::new(CONFIG.storage.db_file.clone()));
    let store = Store::open(persistence).await?;
    db::bootstrap(&store, &CONFIG.booking.admin_password).await?;

    let state = AppState::new(store, CONFIG.clone());

    if let Some(hour) = CONFIG.booking.auto_reset_hour {
        ArchiveScheduler::new(state.clone(), hour).spawn();
    }

    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Fieldbook shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
