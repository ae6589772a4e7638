mod auth;
mod error;
mod message;
mod message_type;

pub use auth::AuthHandshake;
pub use error::ProtocolError;
pub use message::Message;
pub use message_type::MessageType;
