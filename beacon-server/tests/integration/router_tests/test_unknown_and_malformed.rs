use beacon_core::RelayMessage;

use crate::integration::{create_test_router, host_lobby, init_tracing};
use crate::utils::RecordingConnection;

#[test]
fn test_unknown_message_type() {
    init_tracing();

    let (router, registry) = create_test_router();
    let host = host_lobby(&router, "ABCD");

    router.handle_frame(&host.handle(), r#"{"type":"teleport","lobbyCode":"ABCD"}"#);
    router.handle_frame(&host.handle(), r#"{"lobbyCode":"ABCD"}"#);

    assert_eq!(
        host.messages(),
        vec![
            RelayMessage::error("Unknown message type"),
            RelayMessage::error("Unknown message type"),
        ]
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_malformed_frame_does_not_break_connection() {
    init_tracing();

    let (router, registry) = create_test_router();
    let peer = RecordingConnection::new();

    router.handle_frame(&peer.handle(), "this is not json");
    router.handle_frame(&peer.handle(), r#"{"type":"register-host","lobbyCode":42}"#);

    assert_eq!(
        peer.messages(),
        vec![
            RelayMessage::error("Unknown message type"),
            RelayMessage::error("Unknown message type"),
        ]
    );
    assert!(registry.is_empty());

    // The same connection can still register afterwards
    router.handle_frame(&peer.handle(), r#"{"type":"register-host","lobbyCode":"ABCD"}"#);
    assert_eq!(registry.len(), 1);
    assert_eq!(peer.message_count(), 2);
}
