use parley_server::Frame;
use serde_json::json;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{TestIdentity, chat, join_ok};

#[tokio::test]
async fn test_spoofed_and_reserved_messages_are_ignored() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;
    let (mut alice, _) = join_ok(&registry, &room_id, &TestIdentity::new("alice")).await;
    let (mut bob, _) = join_ok(&registry, &room_id, &TestIdentity::new("bob")).await;
    alice.next_message().await;

    // Speaking as someone else.
    alice.send_json(chat("bob", "i am bob"));
    alice.send_json(json!({ "type": "chat", "payload": "anonymous" }));
    // Faking membership events.
    alice.send_json(json!({ "type": "leave", "name": "alice", "payload": "bob" }));
    alice.send_json(json!({ "type": "join", "name": "alice", "payload": "mallory" }));
    alice.send_json(json!({ "type": "list", "name": "alice", "payload": [] }));
    // Not a message at all.
    alice.send(Frame::Text("{not json".into()));
    alice.send(Frame::Text("\"chat\"".into()));

    alice.send_json(chat("alice", "still here"));

    let expected = json!({ "type": "chat", "name": "alice", "payload": "still here" });
    assert_eq!(bob.next_message().await, Some(expected.clone()));
    assert_eq!(alice.next_message().await, Some(expected));

    let room = registry.lookup(&room_id).await.unwrap().unwrap();
    assert_eq!(
        room.members().await,
        Some(vec!["alice".to_owned(), "bob".to_owned()])
    );
}
