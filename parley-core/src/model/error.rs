use crate::model::MessageType;
use thiserror::Error;

/// Reasons an inbound frame is refused by [`Message::parse`](crate::Message::parse).
///
/// None of these end a session: the read pump drops the frame and keeps reading.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("sender name does not match the session identity")]
    IdentitySpoofed,

    #[error("clients may not send `{0}` messages")]
    ReservedType(MessageType),
}
