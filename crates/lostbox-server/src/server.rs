use std::sync::Arc;

use lostbox_core::LifecycleService;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// The lostbox HTTP server: one lifecycle service behind the REST API.
pub struct LostboxServer {
    config: ServerConfig,
    service: Arc<LifecycleService>,
}

impl LostboxServer {
    pub fn new(config: ServerConfig, service: Arc<LifecycleService>) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.service), &self.config)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("lostbox server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lostbox_store::{InMemoryObjectStore, InMemoryRecordStore};

    fn make_server() -> LostboxServer {
        let service = Arc::new(LifecycleService::new(
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(InMemoryObjectStore::new()),
        ));
        LostboxServer::new(ServerConfig::default(), service)
    }

    #[test]
    fn server_construction() {
        let server = make_server();
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:8787".parse().unwrap()
        );
    }

    #[test]
    fn router_builds() {
        let _router = make_server().router();
    }
}
