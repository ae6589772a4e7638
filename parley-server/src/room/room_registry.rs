//! Process-wide directory of rooms.
//!
//! The directory map is owned by a single [`RoomRegistry`] task; everything
//! else talks to it through a cloneable [`RegistryHandle`].

use crate::client::admit;
use crate::config::SignalConfig;
use crate::error::{JoinError, RegistryError};
use crate::mailbox::{Mailbox, MailboxReceiver, mailbox};
use crate::room::{Room, RoomHandle};
use crate::token::generate_room_id;
use crate::transport::Connection;
use parley_core::is_valid_room_key;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument};

struct RegisterRoom {
    room: RoomHandle,
    created: oneshot::Sender<()>,
}

enum RegistryCommand {
    Lookup {
        room_id: String,
        respond_to: oneshot::Sender<Option<RoomHandle>>,
    },
    Delete {
        room_id: String,
        management_key: String,
    },
    RoomCount {
        respond_to: oneshot::Sender<usize>,
    },
}

/// Handle to the room registry.
#[derive(Clone)]
pub struct RegistryHandle {
    register: Mailbox<RegisterRoom>,
    unregister: Mailbox<String>,
    command: Mailbox<RegistryCommand>,
    config: Arc<SignalConfig>,
}

impl RegistryHandle {
    /// Spawns the registry task and returns a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: SignalConfig) -> Self {
        let capacity = config.mailbox_capacity;
        let (register, register_rx) = mailbox(capacity);
        let (unregister, unregister_rx) = mailbox(capacity);
        let (command, command_rx) = mailbox(capacity);

        let registry = RoomRegistry {
            rooms: HashMap::new(),
            register_rx,
            unregister_rx,
            command_rx,
        };
        tokio::spawn(registry.run());

        Self {
            register,
            unregister,
            command,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> Arc<SignalConfig> {
        Arc::clone(&self.config)
    }

    /// Opens a new room managed by `management_key` and returns its id.
    pub async fn create_room(&self, management_key: &str) -> Result<String, RegistryError> {
        if !is_valid_room_key(management_key) {
            return Err(RegistryError::InvalidManagementKey);
        }

        let room_id = generate_room_id();
        let (room, handle) = Room::new(
            room_id.clone(),
            management_key.to_owned(),
            self.unregister.clone(),
            Arc::clone(&self.config),
        );

        let (tx, rx) = oneshot::channel();
        self.register.write(RegisterRoom {
            room: handle,
            created: tx,
        });
        rx.await.map_err(|_| RegistryError::Unavailable)?;

        tokio::spawn(room.run());
        Ok(room_id)
    }

    pub async fn lookup(&self, room_id: &str) -> Result<Option<RoomHandle>, RegistryError> {
        let (tx, rx) = oneshot::channel();
        self.command.write(RegistryCommand::Lookup {
            room_id: room_id.to_owned(),
            respond_to: tx,
        });
        rx.await.map_err(|_| RegistryError::Unavailable)
    }

    /// Tears a room down if `management_key` is the one it was created with.
    /// A wrong key or an unknown room is ignored.
    pub fn delete_room(&self, room_id: &str, management_key: &str) {
        self.command.write(RegistryCommand::Delete {
            room_id: room_id.to_owned(),
            management_key: management_key.to_owned(),
        });
    }

    pub async fn room_count(&self) -> Result<usize, RegistryError> {
        let (tx, rx) = oneshot::channel();
        self.command.write(RegistryCommand::RoomCount { respond_to: tx });
        rx.await.map_err(|_| RegistryError::Unavailable)
    }

    /// Admits a fresh connection into the room named by its handshake.
    ///
    /// Returns once the client's session is running or the join has
    /// failed; failures have already been reported to the peer.
    pub async fn join(&self, conn: Connection) -> Result<(), JoinError> {
        admit(self, conn).await
    }
}

struct RoomRegistry {
    rooms: HashMap<String, RoomHandle>,
    register_rx: MailboxReceiver<RegisterRoom>,
    unregister_rx: MailboxReceiver<String>,
    command_rx: MailboxReceiver<RegistryCommand>,
}

impl RoomRegistry {
    #[instrument(skip_all, name = "registry")]
    async fn run(mut self) {
        loop {
            tokio::select! {
                Some(RegisterRoom { room, created }) = self.register_rx.recv() => {
                    info!(room_id = room.room_id(), "room registered");
                    self.rooms.insert(room.room_id().to_owned(), room);
                    let _ = created.send(());
                }
                Some(room_id) = self.unregister_rx.recv() => {
                    if let Some(room) = self.rooms.remove(&room_id) {
                        room.close().await;
                        info!(%room_id, rooms = self.rooms.len(), "room unregistered");
                    }
                }
                Some(command) = self.command_rx.recv() => self.handle_command(command),
                else => break,
            }
        }
    }

    fn handle_command(&mut self, command: RegistryCommand) {
        match command {
            RegistryCommand::Lookup {
                room_id,
                respond_to,
            } => {
                let _ = respond_to.send(self.rooms.get(&room_id).cloned());
            }
            RegistryCommand::Delete {
                room_id,
                management_key,
            } => match self.rooms.get(&room_id) {
                Some(room) if room.management_key() == management_key => room.self_destruct(),
                Some(_) => debug!(%room_id, "delete refused: wrong management key"),
                None => debug!(%room_id, "delete for unknown room"),
            },
            RegistryCommand::RoomCount { respond_to } => {
                let _ = respond_to.send(self.rooms.len());
            }
        }
    }
}
