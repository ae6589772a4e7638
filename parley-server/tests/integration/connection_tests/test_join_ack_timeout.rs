use parley_server::{Frame, JoinError, SignalConfig};
use serde_json::json;
use std::time::Duration;

use crate::integration::{create_test_room_with, init_tracing};
use crate::utils::{TestIdentity, eventually, join_room};

#[tokio::test(start_paused = true)]
async fn test_unanswered_join_is_rejected_and_rolled_back() {
    init_tracing();

    // The room can never answer before the acknowledgement deadline.
    let config = SignalConfig {
        join_ack_wait: Duration::ZERO,
        ..Default::default()
    };
    let (registry, room_id) = create_test_room_with(config).await;
    let alice = TestIdentity::new("alice");

    let (result, mut peer) = join_room(&registry, &room_id, &alice).await;
    assert_eq!(result, Err(JoinError::CanNotJoinRoom));

    let error = peer.next_message().await.expect("expected an error message");
    assert_eq!(error, json!({ "type": "error", "payload": "cannot join the room" }));
    assert_eq!(peer.next_frame().await, Some(Frame::Close));
    assert_eq!(peer.next_frame().await, None);

    // The late registration is undone, leaving the room without members.
    let (registry, room_id) = (&registry, room_id.as_str());
    let empty = eventually(Duration::from_secs(2), || async move {
        match registry.lookup(room_id).await.unwrap() {
            Some(room) => room.members().await.unwrap_or_default().is_empty(),
            None => true,
        }
    })
    .await;
    assert!(empty, "no member should be left behind");
}
