//! Stateless admission predicates.

mod key;
mod name;

pub use key::{ROOM_KEY_LEN, is_valid_room_key};
pub use name::{MAX_DISPLAY_NAME_LEN, is_valid_display_name};
