//! Stub host server

use crate::common::{NodeConfig, Result};
use crate::node::http::{create_router, NodeState};
use tokio::net::TcpListener;

pub struct NodeServer {
    config: NodeConfig,
    node_id: String,
    state: NodeState,
}

impl NodeServer {
    pub fn new(config: NodeConfig, node_id: String) -> Self {
        Self {
            config,
            node_id,
            state: NodeState::new(),
        }
    }

    /// Registry served by this node
    pub fn state(&self) -> NodeState {
        self.state.clone()
    }

    pub async fn serve(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve_with_listener(listener).await
    }

    /// Serve on an already bound listener until ctrl-c.
    pub async fn serve_with_listener(self, listener: TcpListener) -> Result<()> {
        tracing::info!("Starting node: {}", self.node_id);
        tracing::info!("  HTTP API: {}", listener.local_addr()?);

        let router = create_router(self.state.clone());

        tracing::info!("✓ Node ready");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Node {} stopped", self.node_id);
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
