use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

/// 48 random bytes encode to exactly 64 unpadded base64url characters.
const TOKEN_BYTES: usize = 48;

/// Fresh identifier for a room.
pub fn generate_room_id() -> String {
    generate_token()
}

/// Fresh key usable as a client key or a room management key.
pub fn generate_client_key() -> String {
    generate_token()
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
