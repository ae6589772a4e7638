mod connection;
mod frame;
mod ws_connection;

pub use connection::*;
pub use frame::*;
pub use ws_connection::*;
