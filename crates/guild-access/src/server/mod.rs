//! HTTP server for the site user query.

pub mod transport;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::provider::IdentityProvider;
use crate::resolver::Resolver;
use crate::store::MembershipStore;

/// Guild access HTTP server.
#[derive(Debug, Clone)]
pub struct AppServer {
    resolver: Resolver,
}

impl AppServer {
    /// Create a server over the given collaborators.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn MembershipStore>) -> Self {
        Self { resolver: Resolver::new(provider, store) }
    }

    /// The router, for embedding or for tests.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        transport::create_router(self.resolver.clone())
    }

    /// Run the server until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
