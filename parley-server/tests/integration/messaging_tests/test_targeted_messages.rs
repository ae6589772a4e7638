use serde_json::json;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{TestIdentity, chat, direct, join_ok};

#[tokio::test]
async fn test_negotiation_is_forwarded_to_target_only() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;
    let (mut alice, _) = join_ok(&registry, &room_id, &TestIdentity::new("alice")).await;
    let (mut bob, _) = join_ok(&registry, &room_id, &TestIdentity::new("bob")).await;
    let (mut carol, _) = join_ok(&registry, &room_id, &TestIdentity::new("carol")).await;
    alice.next_message().await;
    alice.next_message().await;
    bob.next_message().await;

    let offer = direct("video-offer", "alice", "bob", json!({ "sdp": "v=0" }));
    alice.send_json(offer.clone());
    assert_eq!(bob.next_message().await, Some(offer));

    let candidate = direct("new-ice-candidate", "bob", "alice", json!({ "candidate": "c" }));
    bob.send_json(candidate.clone());
    assert_eq!(alice.next_message().await, Some(candidate));

    let whisper = direct("chat", "carol", "alice", json!("psst"));
    carol.send_json(whisper.clone());
    assert_eq!(alice.next_message().await, Some(whisper));

    // Only the targets heard anything; the next broadcast is first in line
    // for everyone else.
    carol.send_json(chat("carol", "done"));
    let done = json!({ "type": "chat", "name": "carol", "payload": "done" });
    assert_eq!(bob.next_message().await, Some(done.clone()));
    assert_eq!(carol.next_message().await, Some(done.clone()));
    assert_eq!(alice.next_message().await, Some(done));
}

#[tokio::test]
async fn test_unknown_target_is_dropped_silently() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;
    let (mut alice, _) = join_ok(&registry, &room_id, &TestIdentity::new("alice")).await;
    let (mut bob, _) = join_ok(&registry, &room_id, &TestIdentity::new("bob")).await;
    alice.next_message().await;

    alice.send_json(direct("chat", "alice", "nobody", json!("hello?")));
    alice.send_json(direct("video-answer", "alice", "nobody", json!({})));
    alice.send_json(chat("alice", "marker"));

    let marker = json!({ "type": "chat", "name": "alice", "payload": "marker" });
    assert_eq!(alice.next_message().await, Some(marker.clone()));
    assert_eq!(bob.next_message().await, Some(marker));
}
