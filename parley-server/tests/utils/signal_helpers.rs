use crate::utils::{MockPeer, mock_connection};
use parley_server::{JoinError, RegistryHandle, generate_client_key};
use serde_json::{Value, json};
use std::future::Future;
use std::time::Duration;

/// A client identity for tests: a fresh valid key plus a display name.
pub struct TestIdentity {
    pub name: String,
    pub client_key: String,
}

impl TestIdentity {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            client_key: generate_client_key(),
        }
    }

    /// Same key, so the room treats it as a reconnect.
    pub fn reconnect(&self) -> Self {
        Self {
            name: self.name.clone(),
            client_key: self.client_key.clone(),
        }
    }
}

/// Runs the handshake for `identity` over a fresh mock connection.
pub async fn join_room(
    registry: &RegistryHandle,
    room_id: &str,
    identity: &TestIdentity,
) -> (Result<(), JoinError>, MockPeer) {
    let (conn, peer) = mock_connection();
    peer.send_auth(room_id, &identity.name, &identity.client_key);
    (registry.join(conn).await, peer)
}

/// Like [`join_room`] but panics unless the join succeeds and hands back
/// the roster the client received.
pub async fn join_ok(
    registry: &RegistryHandle,
    room_id: &str,
    identity: &TestIdentity,
) -> (MockPeer, Vec<String>) {
    let (result, mut peer) = join_room(registry, room_id, identity).await;
    result.expect("join should succeed");

    let roster = peer.next_message().await.expect("expected a roster");
    assert_eq!(roster["type"], "list");
    let names = serde_json::from_value(roster["payload"].clone()).expect("roster is a name list");

    (peer, names)
}

pub fn chat(from: &str, text: &str) -> Value {
    json!({ "type": "chat", "name": from, "payload": text })
}

pub fn direct(kind: &str, from: &str, to: &str, payload: Value) -> Value {
    json!({ "type": kind, "name": from, "target": to, "payload": payload })
}

/// Polls `check` until it returns true or `within` elapses.
pub async fn eventually<F, Fut>(within: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + within;
    loop {
        if check().await {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
