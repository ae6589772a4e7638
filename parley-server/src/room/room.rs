use crate::client::{ClientEntry, ClientInfo};
use crate::config::SignalConfig;
use crate::mailbox::{Mailbox, MailboxReceiver, mailbox};
use crate::room::room_command::{JoinRequest, RoomCommand};
use parley_core::Message;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};

/// Handle to a running room.
///
/// Every method is a mailbox write and never waits on the room itself,
/// except for queries that need an answer.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: Arc<str>,
    management_key: Arc<str>,
    register: Mailbox<JoinRequest>,
    unregister: Mailbox<Arc<ClientInfo>>,
    broadcast: Mailbox<Message>,
    forward: Mailbox<Message>,
    command: Mailbox<RoomCommand>,
}

impl RoomHandle {
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub(crate) fn management_key(&self) -> &str {
        &self.management_key
    }

    pub(crate) fn register(&self, request: JoinRequest) {
        self.register.write(request);
    }

    pub(crate) fn unregister(&self, info: Arc<ClientInfo>) {
        self.unregister.write(info);
    }

    pub(crate) fn broadcast(&self, message: Message) {
        self.broadcast.write(message);
    }

    pub(crate) fn forward(&self, message: Message) {
        self.forward.write(message);
    }

    /// Kills every member's session.
    pub fn self_destruct(&self) {
        self.command.write(RoomCommand::SelfDestruct);
    }

    /// Display names of the current members, sorted, or `None` once the
    /// room is gone.
    pub async fn members(&self) -> Option<Vec<String>> {
        let (tx, rx) = oneshot::channel();
        self.command.write(RoomCommand::GetMembers { respond_to: tx });
        rx.await.ok()
    }

    /// Closes every mailbox of the room. Pending events are discarded.
    pub(crate) async fn close(&self) {
        self.register.close().await;
        self.unregister.close().await;
        self.broadcast.close().await;
        self.forward.close().await;
        self.command.close().await;
    }
}

/// Single owner of a room's membership.
pub(crate) struct Room {
    room_id: Arc<str>,
    members: HashMap<String, ClientEntry>,
    register_rx: MailboxReceiver<JoinRequest>,
    unregister_rx: MailboxReceiver<Arc<ClientInfo>>,
    broadcast_rx: MailboxReceiver<Message>,
    forward_rx: MailboxReceiver<Message>,
    command_rx: MailboxReceiver<RoomCommand>,
    registry_unregister: Mailbox<String>,
    config: Arc<SignalConfig>,
}

impl Room {
    pub(crate) fn new(
        room_id: String,
        management_key: String,
        registry_unregister: Mailbox<String>,
        config: Arc<SignalConfig>,
    ) -> (Self, RoomHandle) {
        let capacity = config.mailbox_capacity;
        let (register, register_rx) = mailbox(capacity);
        let (unregister, unregister_rx) = mailbox(capacity);
        let (broadcast, broadcast_rx) = mailbox(capacity);
        let (forward, forward_rx) = mailbox(capacity);
        let (command, command_rx) = mailbox(capacity);
        let room_id: Arc<str> = room_id.into();

        let handle = RoomHandle {
            room_id: Arc::clone(&room_id),
            management_key: management_key.into(),
            register,
            unregister,
            broadcast,
            forward,
            command,
        };

        let room = Self {
            room_id,
            members: HashMap::new(),
            register_rx,
            unregister_rx,
            broadcast_rx,
            forward_rx,
            command_rx,
            registry_unregister,
            config,
        };

        (room, handle)
    }

    /// Processes events until the room empties out.
    ///
    /// Membership is only checked after events that can shrink it. The idle
    /// timer fires once; a room that empties later ends on the event that
    /// emptied it.
    #[instrument(skip_all, name = "room", fields(room_id = %self.room_id))]
    pub(crate) async fn run(mut self) {
        info!("room opened");

        let idle = tokio::time::sleep(self.config.room_idle_timeout);
        tokio::pin!(idle);
        let mut idle_armed = true;

        loop {
            let may_have_emptied = tokio::select! {
                Some(request) = self.register_rx.recv() => {
                    self.handle_register(request);
                    false
                }
                Some(info) = self.unregister_rx.recv() => {
                    self.handle_unregister(info);
                    true
                }
                Some(message) = self.forward_rx.recv() => {
                    self.handle_forward(message);
                    true
                }
                Some(message) = self.broadcast_rx.recv() => {
                    self.handle_broadcast(message);
                    true
                }
                Some(command) = self.command_rx.recv() => {
                    self.handle_command(command);
                    false
                }
                () = &mut idle, if idle_armed => {
                    idle_armed = false;
                    true
                }
                else => break,
            };

            if may_have_emptied && self.members.is_empty() {
                break;
            }
        }

        for entry in self.members.values() {
            entry.kill();
        }
        self.registry_unregister.write(self.room_id.to_string());
        info!("room closed");
    }

    fn handle_register(&mut self, request: JoinRequest) {
        let JoinRequest { entry, joined } = request;

        let name_taken = self.members.values().any(|member| {
            member.display_name() == entry.display_name()
                && member.client_key() != entry.client_key()
        });
        if name_taken {
            let _ = joined.send(false);
            return;
        }
        if joined.send(true).is_err() {
            debug!(client = entry.display_name(), "join abandoned by client");
            return;
        }

        if let Some(previous) = self.members.remove(entry.client_key()) {
            previous.kill();
            self.handle_broadcast(
                Message::leave(previous.display_name(), previous.client_key()).to_everyone(),
            );
        }

        let name = entry.display_name().to_owned();
        let key = entry.client_key().to_owned();
        self.members.insert(key.clone(), entry);

        let roster = Message::list(self.member_names());
        self.deliver(&key, Arc::new(roster));
        self.handle_broadcast(Message::join(&name, &key));

        debug!(client = %name, members = self.members.len(), "client joined");
    }

    fn handle_unregister(&mut self, info: Arc<ClientInfo>) {
        let announce = match self.members.get(&info.client_key) {
            Some(entry) if entry.is(&info) => {
                self.members.remove(&info.client_key);
                true
            }
            // Superseded by a reconnect.
            Some(_) => false,
            // Never admitted or already evicted. Stay quiet if the name now
            // belongs to a member.
            None => !self
                .members
                .values()
                .any(|member| member.display_name() == info.display_name),
        };

        if announce {
            self.handle_broadcast(Message::leave(&info.display_name, &info.client_key));
            debug!(client = %info.display_name, members = self.members.len(), "client left");
        }
    }

    fn handle_forward(&mut self, message: Message) {
        let target = self
            .members
            .values()
            .find(|member| member.display_name() == message.target)
            .map(|member| member.client_key().to_owned());

        match target {
            Some(key) => self.deliver(&key, Arc::new(message)),
            None => debug!(target = %message.target, "forward target not in room"),
        }
    }

    fn handle_broadcast(&mut self, message: Message) {
        let message = Arc::new(message);
        let overflowed: Vec<String> = self
            .members
            .iter()
            .filter(|(key, _)| message.except_key.as_deref() != Some(key.as_str()))
            .filter(|(_, member)| member.deliver(Arc::clone(&message)).is_err())
            .map(|(key, _)| key.clone())
            .collect();

        for key in overflowed {
            self.evict(&key);
        }
    }

    fn handle_command(&mut self, command: RoomCommand) {
        match command {
            RoomCommand::SelfDestruct => {
                info!(members = self.members.len(), "self-destructing");
                for member in self.members.values() {
                    member.kill();
                }
            }
            RoomCommand::GetMembers { respond_to } => {
                let _ = respond_to.send(self.member_names());
            }
        }
    }

    fn deliver(&mut self, client_key: &str, message: Arc<Message>) {
        let Some(member) = self.members.get(client_key) else {
            return;
        };
        if let Err(e) = member.deliver(message) {
            debug!(?e, "delivery failed");
            self.evict(client_key);
        }
    }

    /// Drops a client that cannot keep up. Its pumps stop without a close
    /// frame.
    fn evict(&mut self, client_key: &str) {
        if let Some(member) = self.members.remove(client_key) {
            member.kill();
            warn!(client = member.display_name(), "evicting slow client");
        }
    }

    fn member_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .members
            .values()
            .map(|member| member.display_name().to_owned())
            .collect();
        names.sort_unstable();
        names
    }
}
