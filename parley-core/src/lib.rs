//! Wire model and admission rules shared by the parley signaling hub.
//!
//! Nothing in this crate performs I/O: it decides what a frame means and
//! whether a key or display name may be used, and leaves delivery to
//! `parley-server`.

pub mod model;
pub mod validate;

pub use model::{AuthHandshake, Message, MessageType, ProtocolError};
pub use validate::{is_valid_display_name, is_valid_room_key};
