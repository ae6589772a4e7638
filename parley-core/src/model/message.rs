use crate::model::{MessageType, ProtocolError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// A signaling envelope as it travels between a client and its room.
///
/// `except_key` is routing metadata for the room actor and never reaches
/// the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageType,

    /// Display name of the sender.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Display name of the single recipient, if any.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,

    #[serde(default)]
    pub payload: Value,

    /// Client key that a broadcast of this message skips.
    #[serde(skip)]
    pub except_key: Option<String>,
}

impl Message {
    pub fn new(kind: MessageType, payload: Value) -> Self {
        Self {
            kind,
            name: String::new(),
            target: String::new(),
            payload,
            except_key: None,
        }
    }

    /// Decodes an inbound frame sent by the client known as `expected_name`.
    ///
    /// The decoded `name` must be the sender's own display name, and the
    /// membership types (`list`, `join`, `leave`) are refused outright.
    pub fn parse(bytes: &[u8], expected_name: &str) -> Result<Self, ProtocolError> {
        let message: Message = serde_json::from_slice(bytes)?;

        if message.name != expected_name {
            return Err(ProtocolError::IdentitySpoofed);
        }
        if message.kind.is_reserved() {
            return Err(ProtocolError::ReservedType(message.kind));
        }

        Ok(message)
    }

    /// Whether the room fans this message out instead of forwarding it to
    /// `target`.
    pub fn needs_broadcast(&self) -> bool {
        match self.kind {
            MessageType::VideoOffer
            | MessageType::VideoAnswer
            | MessageType::IceCandidate
            | MessageType::List
            | MessageType::Join
            | MessageType::Leave => false,
            MessageType::Chat => self.target.is_empty(),
            _ => true,
        }
    }

    /// Wire representation (JSON text).
    pub fn build(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Roster sent to a client right after it is admitted.
    pub fn list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<Value> = names.into_iter().map(|n| Value::String(n.into())).collect();
        Self::new(MessageType::List, Value::Array(names))
    }

    pub fn join(name: &str, client_key: &str) -> Self {
        Self::new(MessageType::Join, Value::String(name.to_owned())).except(client_key)
    }

    pub fn leave(name: &str, client_key: &str) -> Self {
        Self::new(MessageType::Leave, Value::String(name.to_owned())).except(client_key)
    }

    pub fn error(err: &impl Display) -> Self {
        Self::new(MessageType::Error, Value::String(err.to_string()))
    }

    /// Skips the client holding `client_key` when broadcast.
    pub fn except(mut self, client_key: &str) -> Self {
        self.except_key = Some(client_key.to_owned());
        self
    }

    /// Delivers to every member when broadcast.
    pub fn to_everyone(mut self) -> Self {
        self.except_key = None;
        self
    }
}
