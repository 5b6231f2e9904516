use crate::transport::Connection;
use axum::extract::ws::Message;
use beacon_core::ConnectionId;
use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::warn;

/// WebSocket-backed connection. Frames are pushed onto the socket's writer queue.
pub struct WsConnection {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<Message>,
}

impl WsConnection {
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            id: ConnectionId::new(),
            tx,
        }
    }
}

impl Connection for WsConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn send_text(&self, text: String) {
        if self.tx.send(Message::Text(text.into())).is_err() {
            warn!("Attempted to send to closed connection {}", self.id);
        }
    }

    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    fn ping(&self) {
        if self.tx.send(Message::Ping(Bytes::new())).is_err() {
            warn!("Attempted to ping closed connection {}", self.id);
        }
    }
}
