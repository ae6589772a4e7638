//! Errors surfaced by the registry to its callers.
//!
//! Protocol violations inside a running session never show up here: they
//! are dropped by the read pump.

use thiserror::Error;

/// Why a connection was not admitted to a room.
///
/// The display text is what the peer receives in its `error` message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    /// The peer vanished before the handshake could be read.
    #[error("connection lost")]
    ConnectionLost,

    #[error("cannot join the room")]
    CanNotJoinRoom,

    #[error("not a valid key")]
    NotAValidKey,

    #[error("not a valid name")]
    NotAValidName,

    #[error("name is already in use")]
    NameIsAlreadyInUse,
}

impl JoinError {
    /// Whether the peer is told about the failure before the connection
    /// is closed.
    pub fn is_reported_to_peer(&self) -> bool {
        !matches!(self, JoinError::ConnectionLost)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("malformed client key.")]
    InvalidManagementKey,

    #[error("room registry is not running")]
    Unavailable,
}
