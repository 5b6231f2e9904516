use crate::error::RelayError;
use crate::model::{ClientId, LobbyCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message types a peer may send to the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    RegisterHost,
    RegisterClient,
    Offer,
    Answer,
    IceCandidateClient,
    IceCandidateHost,
    Message,
    ColorChange,
}

impl SignalKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "register-host" => Some(Self::RegisterHost),
            "register-client" => Some(Self::RegisterClient),
            "offer" => Some(Self::Offer),
            "answer" => Some(Self::Answer),
            "ice-candidate-client" => Some(Self::IceCandidateClient),
            "ice-candidate-host" => Some(Self::IceCandidateHost),
            "message" => Some(Self::Message),
            "color-change" => Some(Self::ColorChange),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegisterHost => "register-host",
            Self::RegisterClient => "register-client",
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::IceCandidateClient => "ice-candidate-client",
            Self::IceCandidateHost => "ice-candidate-host",
            Self::Message => "message",
            Self::ColorChange => "color-change",
        }
    }
}

/// Inbound frame as sent by hosts and clients.
///
/// Every field is optional so that a frame with missing pieces still parses
/// and can be answered with a precise error instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalEnvelope {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lobby_code: Option<LobbyCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
}

impl SignalEnvelope {
    pub fn new(kind: SignalKind, lobby_code: impl Into<LobbyCode>) -> Self {
        Self {
            kind: Some(kind.as_str().to_string()),
            lobby_code: Some(lobby_code.into()),
            ..Default::default()
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<ClientId>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Stores `payload` in the field that belongs to this envelope's type.
    /// Registration envelopes carry no payload and are returned unchanged.
    pub fn with_payload(mut self, payload: Value) -> Self {
        match self.signal_kind() {
            Some(SignalKind::Offer) => self.offer = Some(payload),
            Some(SignalKind::Answer) => self.answer = Some(payload),
            Some(SignalKind::IceCandidateClient | SignalKind::IceCandidateHost) => {
                self.candidate = Some(payload)
            }
            Some(SignalKind::Message) => self.message = Some(payload),
            Some(SignalKind::ColorChange) => self.color = Some(payload),
            _ => {}
        }
        self
    }

    pub fn parse(frame: &str) -> Result<Self, RelayError> {
        Ok(serde_json::from_str(frame)?)
    }

    pub fn signal_kind(&self) -> Option<SignalKind> {
        self.kind.as_deref().and_then(SignalKind::from_tag)
    }
}

/// Outbound frame produced by the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RelayMessage {
    ClientConnected {
        #[serde(rename = "clientId")]
        client_id: ClientId,
    },
    ClientDisconnected {
        #[serde(rename = "clientId")]
        client_id: ClientId,
    },
    Offer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offer: Option<Value>,
    },
    Answer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        answer: Option<Value>,
        #[serde(rename = "clientId")]
        client_id: ClientId,
    },
    IceCandidate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        candidate: Option<Value>,
        #[serde(rename = "clientId", default, skip_serializing_if = "Option::is_none")]
        client_id: Option<ClientId>,
    },
    Message {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Value>,
    },
    ColorChange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Value>,
    },
    Error {
        message: String,
    },
}

impl RelayMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Notice broadcast to every client when their host goes away.
    pub fn host_disconnected() -> Self {
        Self::error("Host disconnected")
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClientConnected { .. } => "client-connected",
            Self::ClientDisconnected { .. } => "client-disconnected",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::IceCandidate { .. } => "ice-candidate",
            Self::Message { .. } => "message",
            Self::ColorChange { .. } => "color-change",
            Self::Error { .. } => "error",
        }
    }
}
