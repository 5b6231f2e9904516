use beacon_core::{ClientId, LobbyCode, RelayMessage, SignalEnvelope, SignalKind};
use beacon_server::Connection;

use crate::integration::{create_test_router, host_lobby, init_tracing, join_lobby};

#[test]
fn test_client_close_notifies_host() {
    init_tracing();

    let (router, registry) = create_test_router();
    let code = LobbyCode::from("ABCD");

    let host = host_lobby(&router, "ABCD");
    let u1 = join_lobby(&router, "ABCD", "u1");
    let u2 = join_lobby(&router, "ABCD", "u2");

    router.handle_close(u1.id());

    assert_eq!(
        host.last_message(),
        Some(RelayMessage::ClientDisconnected {
            client_id: ClientId::from("u1"),
        })
    );

    let lobby = registry.get(&code).expect("Lobby must survive a client leaving");
    assert_eq!(lobby.client_count(), 1);
    assert!(registry.client(&code, &ClientId::from("u1")).is_err());

    // u2 is unaffected
    let remaining = registry.client(&code, &ClientId::from("u2")).unwrap();
    assert_eq!(remaining.id(), u2.id());
    assert_eq!(u2.message_count(), 0);
}

#[test]
fn test_connection_cannot_join_second_lobby() {
    init_tracing();

    let (router, registry) = create_test_router();

    let host_a = host_lobby(&router, "A");
    let host_b = host_lobby(&router, "B");

    let roaming = join_lobby(&router, "A", "r1");
    router.handle_envelope(
        &roaming.handle(),
        SignalEnvelope::new(SignalKind::RegisterClient, "B").with_client_id("r2"),
    );

    assert_eq!(
        roaming.last_message(),
        Some(RelayMessage::error("Connection already joined lobby A"))
    );
    assert_eq!(registry.get(&LobbyCode::from("B")).unwrap().client_count(), 0);
    assert_eq!(host_b.message_count(), 0);

    router.handle_close(roaming.id());

    assert!(registry.snapshot().values().all(|count| *count == 0));
    assert_eq!(
        host_a.last_message(),
        Some(RelayMessage::ClientDisconnected {
            client_id: ClientId::from("r1"),
        })
    );
    assert_eq!(host_b.message_count(), 0);
}
