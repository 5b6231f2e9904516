use crate::api::{lobbies_handler, reset_handler, status_handler};
use crate::config::RelayConfig;
use crate::liveness::LivenessMonitor;
use crate::lobby::LobbyRegistry;
use crate::signaling::{SignalRouter, ws_handler};
use axum::Router;
use axum::routing::{get, post};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub struct AppState {
    pub registry: Arc<LobbyRegistry>,
    pub router: SignalRouter,
}

impl AppState {
    pub fn new() -> Self {
        let registry = Arc::new(LobbyRegistry::new());

        Self {
            router: SignalRouter::new(registry.clone()),
            registry,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// WebSocket signaling on `/` and `/ws`, operator endpoints under `/api`.
pub fn app_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(ws_handler))
        .route("/ws", get(ws_handler))
        .route("/api/status", get(status_handler))
        .route("/api/lobbies", get(lobbies_handler))
        .route("/api/reset", post(reset_handler))
        .layer(cors)
        .with_state(state)
}

/// Serves the relay on `listener` until `shutdown` resolves, with the
/// liveness monitor running alongside.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    ping_interval: Duration,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let monitor = LivenessMonitor::new(state.registry.clone(), ping_interval).spawn();

    info!("Signaling server listening on {}", listener.local_addr()?);

    let result = axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown)
        .await;

    monitor.abort();
    info!("Signaling server stopped");
    result
}

/// Binds `config.bind_addr` and serves a fresh relay until `shutdown` resolves.
pub async fn run<F>(config: RelayConfig, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.bind_addr).await?;
    serve(listener, Arc::new(AppState::new()), config.ping_interval, shutdown).await
}
