//! Server startup.

use std::sync::Arc;

use ssr_render::Component;
use tokio::net::TcpListener;
use tracing::info;

use crate::{router, Orchestrator, ServerError, Settings};

/// Load build output and serve until the process is stopped.
pub async fn serve(settings: Settings, root: Arc<dyn Component>) -> Result<(), ServerError> {
    let orchestrator = Orchestrator::from_config(settings.render, root)?;
    let app = router(Arc::new(orchestrator));

    let listener = TcpListener::bind(settings.listen).await?;
    info!(listen = %settings.listen, "ssr server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ssr server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
