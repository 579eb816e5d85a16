use tokio::net::TcpListener;

use discog_records::Catalog;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;

/// HTTP front end over a [`Catalog`].
pub struct CatalogServer {
    config: ServerConfig,
    catalog: Catalog,
}

impl CatalogServer {
    pub fn new(config: ServerConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.catalog.clone())
    }

    /// Serve requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!("catalog server listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("catalog server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C, shutting down");
    }
}
