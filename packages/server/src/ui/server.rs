//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{GetConnectionsUseCase, GetQueueStateUseCase};

use super::{
    event_loop::{EventLoop, EventLoopHandle},
    handler::{
        http::{get_connections, get_queue_state, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Queue synchronization server
///
/// # Example
///
/// ```ignore
/// let server = bootstrap::build_server(ProtocolVariant::Play);
/// server.run("127.0.0.1".to_string(), 3001).await?;
/// ```
pub struct Server {
    /// 状態を変更する唯一のタスク（起動前）
    event_loop: EventLoop,
    /// イベントループへの入り口
    event_loop_handle: EventLoopHandle,
    /// GetQueueStateUseCase（現在の状態の取得）
    get_queue_state_usecase: Arc<GetQueueStateUseCase>,
    /// GetConnectionsUseCase（接続一覧の取得）
    get_connections_usecase: Arc<GetConnectionsUseCase>,
}

impl Server {
    pub fn new(
        event_loop: EventLoop,
        event_loop_handle: EventLoopHandle,
        get_queue_state_usecase: Arc<GetQueueStateUseCase>,
        get_connections_usecase: Arc<GetConnectionsUseCase>,
    ) -> Self {
        Self {
            event_loop,
            event_loop_handle,
            get_queue_state_usecase,
            get_connections_usecase,
        }
    }

    /// Run the server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3001)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Queue sync server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
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
        let event_loop_task = tokio::spawn(self.event_loop.run());

        let app_state = Arc::new(AppState {
            event_loop: self.event_loop_handle,
            get_queue_state_usecase: self.get_queue_state_usecase,
            get_connections_usecase: self.get_connections_usecase,
        });

        let app = Router::new()
            // WebSocket エンドポイント（素のポートでも受け付ける）
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/queue", get(get_queue_state))
            .route("/api/connections", get(get_connections))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        event_loop_task.abort();
        result
    }
}
