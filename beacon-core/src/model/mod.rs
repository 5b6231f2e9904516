mod api;
mod client;
mod connection;
mod lobby;
mod signaling;

pub use api::ApiMessage;
pub use client::ClientId;
pub use connection::ConnectionId;
pub use lobby::LobbyCode;
pub use signaling::{RelayMessage, SignalEnvelope, SignalKind};
