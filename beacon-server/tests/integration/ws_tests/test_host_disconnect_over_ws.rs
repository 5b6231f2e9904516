use beacon_core::{ClientId, LobbyCode, RelayMessage};

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestRelay};

#[tokio::test]
async fn test_host_disconnect_notifies_clients() {
    init_tracing();

    let relay = TestRelay::spawn().await;
    let code = LobbyCode::from("ABCD");

    let mut host = TestClient::connect(&relay.ws_url()).await.unwrap();
    host.register_host("ABCD").await.unwrap();
    assert!(relay.wait_until(|s| s.registry.contains(&code)).await);

    let mut clients = Vec::new();
    for id in ["u1", "u2"] {
        let mut client = TestClient::connect(&relay.ws_url()).await.unwrap();
        client.register_client("ABCD", id).await.unwrap();
        assert_eq!(
            host.recv().await.unwrap(),
            RelayMessage::ClientConnected {
                client_id: ClientId::from(id),
            }
        );
        clients.push(client);
    }

    host.close().await.expect("Failed to close host");

    for client in clients.iter_mut() {
        assert_eq!(
            client.recv().await.expect("Client got no notice"),
            RelayMessage::host_disconnected()
        );
    }
    assert!(
        relay.wait_until(|s| !s.registry.contains(&code)).await,
        "Lobby should be gone"
    );

    // The code can be hosted again by someone else
    let mut new_host = TestClient::connect(&relay.ws_url()).await.unwrap();
    new_host.register_host("ABCD").await.unwrap();
    assert!(relay.wait_until(|s| s.registry.contains(&code)).await);
    assert!(new_host.expect_silence().await);
}

#[tokio::test]
async fn test_client_disconnect_notifies_host() {
    init_tracing();

    let relay = TestRelay::spawn().await;
    let code = LobbyCode::from("ABCD");

    let mut host = TestClient::connect(&relay.ws_url()).await.unwrap();
    host.register_host("ABCD").await.unwrap();
    assert!(relay.wait_until(|s| s.registry.contains(&code)).await);

    let mut leaving = TestClient::connect(&relay.ws_url()).await.unwrap();
    leaving.register_client("ABCD", "u1").await.unwrap();
    host.recv().await.unwrap();

    let mut staying = TestClient::connect(&relay.ws_url()).await.unwrap();
    staying.register_client("ABCD", "u2").await.unwrap();
    host.recv().await.unwrap();

    leaving.close().await.unwrap();

    assert_eq!(
        host.recv().await.expect("Host got no leave notice"),
        RelayMessage::ClientDisconnected {
            client_id: ClientId::from("u1"),
        }
    );
    assert!(
        relay
            .wait_until(|s| s.registry.snapshot().get(&code) == Some(&1))
            .await
    );
    assert!(staying.expect_silence().await, "Other clients are unaffected");
}
