use crate::lobby::{Departure, LobbyRegistry};
use crate::transport::ConnectionRef;
use beacon_core::{
    ClientId, ConnectionId, LobbyCode, RelayError, RelayMessage, SignalEnvelope, SignalKind,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes inbound frames to the single connection that should receive them.
#[derive(Clone)]
pub struct SignalRouter {
    registry: Arc<LobbyRegistry>,
}

impl SignalRouter {
    pub fn new(registry: Arc<LobbyRegistry>) -> Self {
        Self { registry }
    }

    /// Entry point for a raw text frame from `sender`.
    pub fn handle_frame(&self, sender: &ConnectionRef, frame: &str) {
        match SignalEnvelope::parse(frame) {
            Ok(envelope) => self.handle_envelope(sender, envelope),
            Err(e) => {
                warn!("Invalid frame from {}: {}", sender.id(), e);
                sender.send(&RelayError::UnknownMessageType.to_message());
            }
        }
    }

    pub fn handle_envelope(&self, sender: &ConnectionRef, envelope: SignalEnvelope) {
        if let Err(e) = self.dispatch(sender, envelope) {
            debug!("Rejected message from {}: {}", sender.id(), e);
            sender.send(&e.to_message());
        }
    }

    /// Evicts everything `connection` was registered as and notifies the other side.
    pub fn handle_close(&self, connection: ConnectionId) {
        for departure in self.registry.departures(connection) {
            match departure {
                Departure::Host(code) => self.registry.remove_host(&code),
                Departure::Client(code, client_id) => {
                    self.registry.remove_client(&code, &client_id)
                }
            }
        }
    }

    /// Errors returned from here are reported to the sender.
    fn dispatch(&self, sender: &ConnectionRef, envelope: SignalEnvelope) -> Result<(), RelayError> {
        let SignalEnvelope {
            kind,
            lobby_code,
            client_id,
            offer,
            answer,
            candidate,
            message,
            color,
        } = envelope;

        let Some(code) = lobby_code.filter(|code| !code.is_empty()) else {
            warn!("Missing lobby code in message from {}", sender.id());
            return Err(RelayError::MissingLobbyCode);
        };
        let client_id = client_id.filter(|id| !id.is_empty());

        let Some(signal) = kind.as_deref().and_then(SignalKind::from_tag) else {
            debug!("Unknown message type {:?} from {}", kind, sender.id());
            return Err(RelayError::UnknownMessageType);
        };

        match signal {
            SignalKind::RegisterHost => {
                self.registry.create(code, sender.clone())?;
            }
            SignalKind::RegisterClient => self.register_client(sender, &code, client_id)?,
            SignalKind::Offer => {
                self.forward_to_client(&code, client_id, RelayMessage::Offer { offer })
            }
            SignalKind::IceCandidateHost => self.forward_to_client(
                &code,
                client_id,
                RelayMessage::IceCandidate {
                    candidate,
                    client_id: None,
                },
            ),
            SignalKind::Message => {
                self.forward_to_client(&code, client_id, RelayMessage::Message { message })
            }
            SignalKind::ColorChange => {
                self.forward_to_client(&code, client_id, RelayMessage::ColorChange { color })
            }
            SignalKind::Answer => {
                self.forward_to_host(&code, client_id, "forward answer", |client_id| {
                    RelayMessage::Answer { answer, client_id }
                })?
            }
            SignalKind::IceCandidateClient => {
                self.forward_to_host(&code, client_id, "forward ICE candidate", |client_id| {
                    RelayMessage::IceCandidate {
                        candidate,
                        client_id: Some(client_id),
                    }
                })?
            }
        }

        Ok(())
    }

    fn register_client(
        &self,
        sender: &ConnectionRef,
        code: &LobbyCode,
        client_id: Option<ClientId>,
    ) -> Result<(), RelayError> {
        // A missing lobby is reported before a missing id
        if !self.registry.contains(code) {
            return Err(RelayError::NotFound(code.clone()));
        }
        let client_id = client_id.ok_or(RelayError::MissingClientId("join lobby"))?;

        let host = self
            .registry
            .add_client(code, client_id.clone(), sender.clone())?;

        host.send(&RelayMessage::ClientConnected { client_id });
        Ok(())
    }

    /// Stale targets are logged and dropped; the sender is not told.
    fn forward_to_client(
        &self,
        code: &LobbyCode,
        client_id: Option<ClientId>,
        message: RelayMessage,
    ) {
        let Some(client_id) = client_id else {
            warn!(
                "Could not forward {}, no client ID in message for lobby {}",
                message.kind(),
                code
            );
            return;
        };

        match self.registry.client(code, &client_id) {
            Ok(client) => {
                client.send(&message);
                debug!(
                    "Forwarded {} to client {} in lobby {}",
                    message.kind(),
                    client_id,
                    code
                );
            }
            Err(e) => warn!("Could not forward {}: {}", message.kind(), e),
        }
    }

    /// A missing lobby is logged and dropped; a missing client id is an error for the sender.
    fn forward_to_host<F>(
        &self,
        code: &LobbyCode,
        client_id: Option<ClientId>,
        action: &'static str,
        build: F,
    ) -> Result<(), RelayError>
    where
        F: FnOnce(ClientId) -> RelayMessage,
    {
        let host = match self.registry.host(code) {
            Ok(host) => host,
            Err(e) => {
                warn!("Unable to {}: {}", action, e);
                return Ok(());
            }
        };
        let client_id = client_id.ok_or(RelayError::MissingClientId(action))?;

        let message = build(client_id.clone());
        host.send(&message);
        debug!(
            "Forwarded {} from client {} to host of lobby {}",
            message.kind(),
            client_id,
            code
        );
        Ok(())
    }
}
