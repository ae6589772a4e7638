mod room_routes;
mod ws_handler;

pub use room_routes::*;
pub use ws_handler::*;

use crate::room::RegistryHandle;

/// Shared state of the HTTP layer.
#[derive(Clone)]
pub struct AppState {
    pub registry: RegistryHandle,
}

impl AppState {
    pub fn new(registry: RegistryHandle) -> Self {
        Self { registry }
    }
}
