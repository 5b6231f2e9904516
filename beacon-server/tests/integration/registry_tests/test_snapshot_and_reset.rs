use beacon_core::LobbyCode;
use std::collections::BTreeMap;

use crate::integration::{create_test_router, host_lobby, init_tracing, join_lobby};

#[test]
fn test_snapshot_counts_clients() {
    init_tracing();

    let (router, registry) = create_test_router();

    host_lobby(&router, "AAAA");
    host_lobby(&router, "BBBB");
    join_lobby(&router, "AAAA", "u1");
    join_lobby(&router, "AAAA", "u2");

    let expected = BTreeMap::from([(LobbyCode::from("AAAA"), 2), (LobbyCode::from("BBBB"), 0)]);
    assert_eq!(registry.snapshot(), expected);
}

#[test]
fn test_reset_drops_state_without_notifications() {
    init_tracing();

    let (router, registry) = create_test_router();

    let host = host_lobby(&router, "AAAA");
    let client = join_lobby(&router, "AAAA", "u1");
    let host_messages = host.message_count();

    registry.reset();

    assert!(registry.is_empty());
    assert!(registry.snapshot().is_empty());
    assert_eq!(host.message_count(), host_messages);
    assert_eq!(client.message_count(), 0);

    // The code is free again
    let new_host = host_lobby(&router, "AAAA");
    assert_eq!(new_host.message_count(), 0);
    assert!(registry.contains(&LobbyCode::from("AAAA")));
}
