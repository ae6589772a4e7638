use parley_server::{Frame, JoinError};
use serde_json::json;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{MockPeer, TestIdentity, join_room, mock_connection};

async fn expect_error_then_close(peer: &mut MockPeer, text: &str) {
    let error = peer.next_message().await.expect("expected an error message");
    assert_eq!(error, json!({ "type": "error", "payload": text }));

    assert_eq!(peer.next_frame().await, Some(Frame::Close));
    assert_eq!(peer.next_frame().await, None);
    assert!(peer.is_closed());
}

#[tokio::test]
async fn test_invalid_client_key_is_rejected() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;
    let weak = TestIdentity {
        name: "alice".into(),
        client_key: "k".repeat(64),
    };

    let (result, mut peer) = join_room(&registry, &room_id, &weak).await;
    assert_eq!(result, Err(JoinError::NotAValidKey));
    expect_error_then_close(&mut peer, "not a valid key").await;
}

#[tokio::test]
async fn test_invalid_display_name_is_rejected() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;

    for name in ["", "two words", "\u{202e}evil", "seventeen-chars!!"] {
        let identity = TestIdentity::new(name);
        let (result, mut peer) = join_room(&registry, &room_id, &identity).await;

        assert_eq!(result, Err(JoinError::NotAValidName), "name {name:?}");
        expect_error_then_close(&mut peer, "not a valid name").await;
    }
}

#[tokio::test]
async fn test_unknown_room_is_rejected() {
    init_tracing();

    let (registry, _room_id) = create_test_room().await;
    let alice = TestIdentity::new("alice");

    let (result, mut peer) = join_room(&registry, "no-such-room", &alice).await;
    assert_eq!(result, Err(JoinError::CanNotJoinRoom));
    expect_error_then_close(&mut peer, "cannot join the room").await;
}

#[tokio::test]
async fn test_malformed_handshake_is_rejected() {
    init_tracing();

    let (registry, _room_id) = create_test_room().await;
    let (conn, mut peer) = mock_connection();
    peer.send(Frame::Text("hello?".into()));

    assert_eq!(registry.join(conn).await, Err(JoinError::CanNotJoinRoom));
    expect_error_then_close(&mut peer, "cannot join the room").await;
}

#[tokio::test]
async fn test_handshake_after_keepalive_is_accepted() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;
    let alice = TestIdentity::new("alice");
    let (conn, mut peer) = mock_connection();

    peer.send(Frame::Pong(Default::default()));
    peer.send_auth(&room_id, &alice.name, &alice.client_key);

    assert_eq!(registry.join(conn).await, Ok(()));
    let roster = peer.next_message().await.unwrap();
    assert_eq!(roster, json!({ "type": "list", "payload": ["alice"] }));
}

#[tokio::test]
async fn test_handshake_without_key_fails_key_check() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;
    let (conn, mut peer) = mock_connection();
    peer.send_json(json!({ "room_id": room_id, "name": "alice" }));

    assert_eq!(registry.join(conn).await, Err(JoinError::NotAValidKey));
    expect_error_then_close(&mut peer, "not a valid key").await;
}
