use serde_json::json;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{TestIdentity, chat, join_ok};

#[tokio::test]
async fn test_chat_reaches_everyone_including_sender() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;
    let (mut alice, _) = join_ok(&registry, &room_id, &TestIdentity::new("alice")).await;
    let (mut bob, roster) = join_ok(&registry, &room_id, &TestIdentity::new("bob")).await;
    assert_eq!(roster, vec!["alice", "bob"]);

    assert_eq!(
        alice.next_message().await,
        Some(json!({ "type": "join", "payload": "bob" }))
    );

    alice.send_json(chat("alice", "hello"));

    let expected = json!({ "type": "chat", "name": "alice", "payload": "hello" });
    assert_eq!(alice.next_message().await, Some(expected.clone()));
    assert_eq!(bob.next_message().await, Some(expected));
}

#[tokio::test]
async fn test_unknown_types_are_broadcast_verbatim() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;
    let (mut alice, _) = join_ok(&registry, &room_id, &TestIdentity::new("alice")).await;
    let (mut bob, _) = join_ok(&registry, &room_id, &TestIdentity::new("bob")).await;
    alice.next_message().await;

    let reaction = json!({ "type": "reaction", "name": "bob", "payload": { "emoji": "+1" } });
    bob.send_json(reaction.clone());

    assert_eq!(alice.next_message().await, Some(reaction.clone()));
    assert_eq!(bob.next_message().await, Some(reaction));
}

#[tokio::test]
async fn test_embedded_newlines_are_flattened() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;
    let (mut alice, _) = join_ok(&registry, &room_id, &TestIdentity::new("alice")).await;

    alice.send(parley_server::Frame::Text(
        "{\"type\":\"chat\",\n\"name\":\"alice\",\n\"payload\":\"a\"}\n".into(),
    ));

    assert_eq!(
        alice.next_message().await,
        Some(json!({ "type": "chat", "name": "alice", "payload": "a" }))
    );
}
