pub mod http;

pub use http::{AppState, router};

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::application::TailReaderService;
use crate::config::Config;

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr();
    let fixed_file = config
        .fixed_file
        .as_ref()
        .map(|p| p.display().to_string());

    let app = router(AppState::new(config, Arc::new(TailReaderService::new())));

    let listener = TcpListener::bind(addr).await.inspect_err(|e| {
        tracing::error!("failed to bind {}: {}", addr, e);
    })?;

    let local_addr = listener.local_addr()?;
    tracing::info!(
        fixed_file = fixed_file.as_deref().unwrap_or("<per request>"),
        "Starting HTTP server at http://{}",
        local_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C, running until killed: {}", e);
        std::future::pending::<()>().await;
    }
}
