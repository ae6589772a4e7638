pub use parley_core::{Message, MessageType};

pub mod model {
    pub use parley_core::model::*;
    pub use parley_core::validate::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use parley_server::*;
}
