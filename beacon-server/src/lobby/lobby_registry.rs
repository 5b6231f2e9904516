use crate::lobby::{Departure, Lobby};
use crate::transport::ConnectionRef;
use beacon_core::{ClientId, ConnectionId, LobbyCode, RelayError, RelayMessage};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Process-wide directory of lobbies.
///
/// All reads and writes go through one lock. Notifications are sent only after
/// the lock is released.
#[derive(Default)]
pub struct LobbyRegistry {
    lobbies: Mutex<HashMap<LobbyCode, Lobby>>,
}

impl LobbyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<LobbyCode, Lobby>> {
        self.lobbies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(&self, code: LobbyCode, host: ConnectionRef) -> Result<Lobby, RelayError> {
        let mut lobbies = self.lock();

        match lobbies.entry(code) {
            Entry::Occupied(entry) => Err(RelayError::AlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                let lobby = Lobby::new(entry.key().clone(), host);
                info!("Lobby created with code {}", lobby.code());
                Ok(entry.insert(lobby).clone())
            }
        }
    }

    pub fn get(&self, code: &LobbyCode) -> Result<Lobby, RelayError> {
        self.lock()
            .get(code)
            .cloned()
            .ok_or_else(|| RelayError::NotFound(code.clone()))
    }

    pub fn contains(&self, code: &LobbyCode) -> bool {
        self.lock().contains_key(code)
    }

    pub fn host(&self, code: &LobbyCode) -> Result<ConnectionRef, RelayError> {
        self.lock()
            .get(code)
            .map(|lobby| lobby.host().clone())
            .ok_or_else(|| RelayError::NotFound(code.clone()))
    }

    pub fn client(&self, code: &LobbyCode, client_id: &ClientId) -> Result<ConnectionRef, RelayError> {
        let lobbies = self.lock();
        let lobby = lobbies
            .get(code)
            .ok_or_else(|| RelayError::NotFound(code.clone()))?;

        lobby
            .client(client_id)
            .cloned()
            .ok_or_else(|| RelayError::UnknownClient {
                lobby_code: code.clone(),
                client_id: client_id.clone(),
            })
    }

    /// Inserts `connection` under `client_id` and hands back the host it joined.
    ///
    /// A connection may be a client of one lobby at a time.
    pub fn add_client(
        &self,
        code: &LobbyCode,
        client_id: ClientId,
        connection: ConnectionRef,
    ) -> Result<ConnectionRef, RelayError> {
        let mut lobbies = self.lock();

        if !lobbies.contains_key(code) {
            return Err(RelayError::NotFound(code.clone()));
        }
        if let Some(joined) = lobbies
            .values()
            .find(|lobby| lobby.has_client_connection(connection.id()))
        {
            return Err(RelayError::AlreadyJoined {
                joined: joined.code().clone(),
            });
        }

        let Some(lobby) = lobbies.get_mut(code) else {
            return Err(RelayError::NotFound(code.clone()));
        };
        if lobby.client(&client_id).is_some() {
            return Err(RelayError::DuplicateClient {
                lobby_code: code.clone(),
                client_id,
            });
        }

        info!("Client {} connected to lobby {}", client_id, code);
        lobby.insert_client(client_id, connection);
        Ok(lobby.host().clone())
    }

    /// Drops one client and tells the host. Does nothing if either is already gone.
    pub fn remove_client(&self, code: &LobbyCode, client_id: &ClientId) {
        let host = {
            let mut lobbies = self.lock();
            let Some(lobby) = lobbies.get_mut(code) else {
                return;
            };
            if lobby.remove_client(client_id).is_none() {
                return;
            }
            lobby.host().clone()
        };

        info!("Client {} disconnected from lobby {}", client_id, code);
        host.send(&RelayMessage::ClientDisconnected {
            client_id: client_id.clone(),
        });
    }

    /// Deletes the lobby and tells every client that the host is gone.
    /// Client connections stay open; closing them is up to the transport.
    pub fn remove_host(&self, code: &LobbyCode) {
        let Some(lobby) = self.lock().remove(code) else {
            return;
        };

        info!(
            "Host of lobby {} disconnected, releasing {} client(s)",
            code,
            lobby.client_count()
        );

        let notice = RelayMessage::host_disconnected();
        for (_, client) in lobby.clients() {
            client.send(&notice);
        }
    }

    /// Every registry entry that refers to `connection`.
    pub fn departures(&self, connection: ConnectionId) -> Vec<Departure> {
        let lobbies = self.lock();
        let mut departures = Vec::new();

        for (code, lobby) in lobbies.iter() {
            if lobby.is_hosted_by(connection) {
                departures.push(Departure::Host(code.clone()));
            }
            for client_id in lobby.client_ids_of(connection) {
                departures.push(Departure::Client(code.clone(), client_id));
            }
        }

        departures
    }

    /// Hosts and clients of every lobby, cloned out of the lock.
    pub fn connections(&self) -> Vec<ConnectionRef> {
        let lobbies = self.lock();

        lobbies
            .values()
            .flat_map(|lobby| {
                std::iter::once(lobby.host().clone())
                    .chain(lobby.clients().map(|(_, conn)| conn.clone()))
            })
            .collect()
    }

    pub fn snapshot(&self) -> BTreeMap<LobbyCode, usize> {
        self.lock()
            .iter()
            .map(|(code, lobby)| (code.clone(), lobby.client_count()))
            .collect()
    }

    pub fn reset(&self) {
        let mut lobbies = self.lock();
        debug!("Dropping {} lobbies", lobbies.len());
        lobbies.clear();
        info!("Lobby registry reset");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
