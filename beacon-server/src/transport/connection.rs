use beacon_core::{ConnectionId, RelayMessage};
use std::fmt;
use std::sync::Arc;
use tracing::error;

/// Outbound half of a peer connection, as seen by the lobby registry and router.
///
/// Implemented by the WebSocket transport. Every method returns immediately:
/// delivery is fire-and-forget and failures on closed connections are only logged.
pub trait Connection: Send + Sync {
    fn id(&self) -> ConnectionId;

    /// Queue one text frame for the peer.
    fn send_text(&self, text: String);

    fn is_open(&self) -> bool;

    /// Queue a transport-level liveness probe.
    fn ping(&self);

    fn send(&self, message: &RelayMessage) {
        match serde_json::to_string(message) {
            Ok(json) => self.send_text(json),
            Err(e) => error!("Failed to serialize {} message: {}", message.kind(), e),
        }
    }
}

pub type ConnectionRef = Arc<dyn Connection>;

impl fmt::Debug for dyn Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").field("id", &self.id()).finish()
    }
}
