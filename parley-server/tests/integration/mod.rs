
use parley_server::{RegistryHandle, SignalConfig, generate_client_key};
use tracing::Level;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A registry with default timings and one freshly created room.
pub async fn create_test_room() -> (RegistryHandle, String) {
    create_test_room_with(SignalConfig::default()).await
}

pub async fn create_test_room_with(config: SignalConfig) -> (RegistryHandle, String) {
    let registry = RegistryHandle::new(config);
    let room_id = registry
        .create_room(&generate_client_key())
        .await
        .expect("Failed to create room");

    (registry, room_id)
}
