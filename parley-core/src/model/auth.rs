use serde::{Deserialize, Serialize};

/// First frame of every connection: which room to enter and as whom.
///
/// Absent fields decode as empty strings and fail validation later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthHandshake {
    pub room_id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub client_key: String,
}

impl AuthHandshake {
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
