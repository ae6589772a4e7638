//! Actor core of the parley signaling hub.
//!
//! ```text
//! RoomRegistry (one per process)
//! └── Room (one per room id)
//!     └── client session (read pump + write pump per connection)
//! ```
//!
//! Every map of rooms or members is owned by exactly one task and is only
//! reached through that task's mailboxes.

mod client;
mod config;
mod error;
mod mailbox;
mod room;
mod signaling;
mod token;
mod transport;

pub use config::SignalConfig;
pub use error::{JoinError, RegistryError};
pub use mailbox::{Mailbox, MailboxReceiver, mailbox};
pub use room::{RegistryHandle, RoomHandle};
pub use signaling::{AppState, router, ws_handler};
pub use token::{generate_client_key, generate_room_id};
pub use transport::{Connection, Frame, FrameReader, FrameWriter, TransportError, WsConnection};
