use crate::model::{ClientId, LobbyCode, RelayMessage};
use thiserror::Error;

/// Failures of lobby and routing operations.
///
/// `Display` output is exactly the text sent back to peers in `error` frames.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Missing lobby code")]
    MissingLobbyCode,

    /// The message needed a `clientId`; the payload names the attempted action.
    #[error("Unable to {0}, no ID in message")]
    MissingClientId(&'static str),

    #[error("Lobby with code {0} does not exist")]
    NotFound(LobbyCode),

    #[error("Lobby already exists")]
    AlreadyExists(LobbyCode),

    #[error("Client ID already exists in this lobby")]
    DuplicateClient {
        lobby_code: LobbyCode,
        client_id: ClientId,
    },

    /// The connection is already registered as a client of another lobby.
    #[error("Connection already joined lobby {joined}")]
    AlreadyJoined { joined: LobbyCode },

    #[error("Client {client_id} does not exist in lobby {lobby_code}")]
    UnknownClient {
        lobby_code: LobbyCode,
        client_id: ClientId,
    },

    #[error("Unknown message type")]
    UnknownMessageType,

    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl RelayError {
    pub fn to_message(&self) -> RelayMessage {
        RelayMessage::error(self.to_string())
    }
}
