use crate::transport::ConnectionRef;
use beacon_core::{ClientId, ConnectionId, LobbyCode};
use std::collections::HashMap;

/// One host and the clients that joined its code.
///
/// The host is not optional: a lobby whose host leaves is deleted, never kept host-less.
#[derive(Debug, Clone)]
pub struct Lobby {
    code: LobbyCode,
    host: ConnectionRef,
    clients: HashMap<ClientId, ConnectionRef>,
}

impl Lobby {
    pub fn new(code: LobbyCode, host: ConnectionRef) -> Self {
        Self {
            code,
            host,
            clients: HashMap::new(),
        }
    }

    pub fn code(&self) -> &LobbyCode {
        &self.code
    }

    pub fn host(&self) -> &ConnectionRef {
        &self.host
    }

    pub fn client(&self, client_id: &ClientId) -> Option<&ConnectionRef> {
        self.clients.get(client_id)
    }

    pub fn clients(&self) -> impl Iterator<Item = (&ClientId, &ConnectionRef)> {
        self.clients.iter()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub(crate) fn insert_client(&mut self, client_id: ClientId, connection: ConnectionRef) {
        self.clients.insert(client_id, connection);
    }

    pub(crate) fn remove_client(&mut self, client_id: &ClientId) -> Option<ConnectionRef> {
        self.clients.remove(client_id)
    }

    pub(crate) fn is_hosted_by(&self, connection: ConnectionId) -> bool {
        self.host.id() == connection
    }

    pub(crate) fn has_client_connection(&self, connection: ConnectionId) -> bool {
        self.clients.values().any(|conn| conn.id() == connection)
    }

    pub(crate) fn client_ids_of(&self, connection: ConnectionId) -> Vec<ClientId> {
        self.clients
            .iter()
            .filter(|(_, conn)| conn.id() == connection)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// A registry entry that references a connection which just closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    Host(LobbyCode),
    Client(LobbyCode, ClientId),
}
