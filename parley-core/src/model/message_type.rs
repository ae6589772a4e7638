use serde::{Deserialize, Serialize};
use std::fmt;

/// The `type` tag of a [`Message`](crate::Message).
///
/// Unrecognised tags are kept verbatim in [`MessageType::Other`] so they
/// survive a parse/build cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageType {
    VideoOffer,
    VideoAnswer,
    IceCandidate,
    Chat,
    List,
    Join,
    Leave,
    Error,
    Other(String),
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::VideoOffer => "video-offer",
            MessageType::VideoAnswer => "video-answer",
            MessageType::IceCandidate => "new-ice-candidate",
            MessageType::Chat => "chat",
            MessageType::List => "list",
            MessageType::Join => "join",
            MessageType::Leave => "leave",
            MessageType::Error => "error",
            MessageType::Other(tag) => tag,
        }
    }

    /// Membership notifications only the hub itself may originate.
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            MessageType::List | MessageType::Join | MessageType::Leave
        )
    }
}

impl From<String> for MessageType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "video-offer" => MessageType::VideoOffer,
            "video-answer" => MessageType::VideoAnswer,
            "new-ice-candidate" | "ice-candidate" => MessageType::IceCandidate,
            "chat" => MessageType::Chat,
            "list" => MessageType::List,
            "join" => MessageType::Join,
            "leave" => MessageType::Leave,
            "error" => MessageType::Error,
            _ => MessageType::Other(tag),
        }
    }
}

impl From<MessageType> for String {
    fn from(kind: MessageType) -> Self {
        match kind {
            MessageType::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
