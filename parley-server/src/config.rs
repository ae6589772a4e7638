use std::time::Duration;

/// Timing and sizing knobs shared by the registry, its rooms and every
/// client session.
#[derive(Debug, Clone)]
pub struct SignalConfig {
    /// Time allowed for the auth handshake to arrive.
    pub auth_wait: Duration,
    /// Time allowed for a room to accept or refuse a join.
    pub join_ack_wait: Duration,
    /// Time allowed for a single write (or a coalesced burst) to the peer.
    pub write_wait: Duration,
    /// Read idle window; refreshed by every pong.
    pub pong_wait: Duration,
    /// Keepalive ping period. Must be less than `pong_wait`.
    pub ping_period: Duration,
    /// Largest inbound frame accepted, in bytes.
    pub max_message_size: usize,
    /// Capacity of each client's outbound queue.
    pub outbound_capacity: usize,
    /// A room nobody has joined within this window is destroyed.
    pub room_idle_timeout: Duration,
    /// Buffered capacity of actor mailboxes before writes go in flight.
    pub mailbox_capacity: usize,
}

impl SignalConfig {
    /// Sets the read idle window and derives the ping period from it.
    pub fn with_pong_wait(mut self, pong_wait: Duration) -> Self {
        self.pong_wait = pong_wait;
        self.ping_period = pong_wait * 9 / 10;
        self
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        let pong_wait = Duration::from_secs(60);
        Self {
            auth_wait: Duration::from_secs(5),
            join_ack_wait: Duration::from_secs(2),
            write_wait: Duration::from_secs(10),
            pong_wait,
            ping_period: pong_wait * 9 / 10,
            max_message_size: 10240,
            outbound_capacity: 256,
            room_idle_timeout: Duration::from_secs(30),
            mailbox_capacity: 64,
        }
    }
}
