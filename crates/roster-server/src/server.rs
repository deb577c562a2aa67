use std::sync::Arc;

use anyhow::Context;
use roster_config::ServerConfig;
use roster_store::UserStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::handlers::{router, HandlerContext};

pub struct RosterServer {
    ctx: Arc<HandlerContext>,
    config: ServerConfig,
}

impl RosterServer {
    pub fn new(config: ServerConfig, store: UserStore) -> Self {
        Self {
            ctx: Arc::new(HandlerContext::new(Arc::new(store))),
            config,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!(
            "Server listening on http://{} with {} users",
            listener.local_addr()?,
            self.ctx.store.len()
        );

        let app = router(Arc::clone(&self.ctx), self.config.cors);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
