//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, put},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::StoreUseCases;

use super::{
    handler::{create_document, get_document, health_check, subscribe_handler, update_document},
    signal::shutdown_signal,
    state::AppState,
};

/// Document store server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(StoreUseCases::in_memory(Arc::new(SystemClock)));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    usecases: StoreUseCases,
}

impl Server {
    /// Create a new Server instance
    pub fn new(usecases: StoreUseCases) -> Self {
        Self { usecases }
    }

    fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            usecases: self.usecases,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws/documents/{document_id}", get(subscribe_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route(
                "/api/documents/{document_id}",
                put(create_document)
                    .get(get_document)
                    .patch(update_document),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the document store server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Press Ctrl+C to shutdown gracefully");
        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        tracing::info!("Document store listening on {}", local_addr);
        tracing::info!("Subscribe at: ws://{}/ws/documents/{{id}}", local_addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
