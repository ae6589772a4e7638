use parley_server::{Frame, JoinError};
use std::time::Duration;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::mock_connection;

#[tokio::test(start_paused = true)]
async fn test_silent_peer_times_out_without_error_message() {
    init_tracing();

    let (registry, _room_id) = create_test_room().await;
    let (conn, mut peer) = mock_connection();

    let started = tokio::time::Instant::now();
    assert_eq!(registry.join(conn).await, Err(JoinError::ConnectionLost));
    assert!(started.elapsed() >= Duration::from_secs(5));

    // Nothing is reported to a peer that never spoke, the socket is just
    // closed.
    assert_eq!(peer.next_frame().await, Some(Frame::Close));
    assert_eq!(peer.next_frame().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_peer_gone_before_handshake() {
    init_tracing();

    let (registry, room_id) = create_test_room().await;
    let (conn, mut peer) = mock_connection();
    peer.hang_up();

    assert_eq!(registry.join(conn).await, Err(JoinError::ConnectionLost));
    assert_eq!(peer.next_frame().await, Some(Frame::Close));
    assert_eq!(peer.next_frame().await, None);

    let room = registry.lookup(&room_id).await.unwrap().unwrap();
    assert_eq!(room.members().await, Some(vec![]));
}
