use crate::app::AppState;
use crate::signaling::SignalRouter;
use crate::transport::{ConnectionRef, WsConnection};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, trace, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let router = state.router.clone();

    ws.on_upgrade(move |socket| handle_socket(socket, router))
}

async fn handle_socket(socket: WebSocket, router: SignalRouter) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let connection: ConnectionRef = Arc::new(WsConnection::new(tx));
    let connection_id = connection.id();
    info!("New WebSocket connection: {}", connection_id);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let router = router.clone();
        let connection = connection.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => router.handle_frame(&connection, text.as_str()),
                    Message::Binary(data) => match std::str::from_utf8(&data) {
                        Ok(text) => router.handle_frame(&connection, text),
                        Err(_) => warn!("Ignoring non UTF-8 frame from {}", connection.id()),
                    },
                    Message::Pong(_) => trace!("Pong from {}", connection.id()),
                    Message::Close(_) => break,
                    Message::Ping(_) => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    router.handle_close(connection_id);
    info!("WebSocket disconnected: {}", connection_id);
}
