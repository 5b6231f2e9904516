use beacon_core::{LobbyCode, RelayMessage};
use beacon_server::Connection;

use crate::integration::{create_test_router, host_lobby, init_tracing, join_lobby};

#[test]
fn test_host_close_evicts_lobby() {
    init_tracing();

    let (router, registry) = create_test_router();
    let code = LobbyCode::from("ABCD");

    let host = host_lobby(&router, "ABCD");
    let alice = join_lobby(&router, "ABCD", "alice");
    let bob = join_lobby(&router, "ABCD", "bob");

    router.handle_close(host.id());

    assert!(!registry.contains(&code), "Lobby should be deleted");
    assert!(registry.get(&code).is_err());

    for client in [&alice, &bob] {
        assert_eq!(client.messages(), vec![RelayMessage::host_disconnected()]);
    }

    // Host only ever saw the two join announcements
    assert_eq!(host.message_count(), 2);
}

#[test]
fn test_host_close_leaves_other_lobbies() {
    init_tracing();

    let (router, registry) = create_test_router();

    let host_a = host_lobby(&router, "A");
    host_lobby(&router, "B");
    let client_b = join_lobby(&router, "B", "u1");

    router.handle_close(host_a.id());

    assert!(!registry.contains(&LobbyCode::from("A")));
    assert!(registry.contains(&LobbyCode::from("B")));
    assert_eq!(client_b.message_count(), 0);
}

#[test]
fn test_remove_host_of_absent_lobby_is_noop() {
    init_tracing();

    let (router, registry) = create_test_router();
    let host = host_lobby(&router, "ABCD");

    registry.remove_host(&LobbyCode::from("ZZZZ"));

    assert!(registry.contains(&LobbyCode::from("ABCD")));
    assert_eq!(host.message_count(), 0);
}
