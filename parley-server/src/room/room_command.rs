use crate::client::ClientEntry;
use tokio::sync::oneshot;

/// A client asking to be admitted. The room answers on `joined`: `true`
/// once it is a member, `false` when its name is taken.
#[derive(Debug)]
pub struct JoinRequest {
    pub(crate) entry: ClientEntry,
    pub(crate) joined: oneshot::Sender<bool>,
}

/// Administrative requests to a room.
#[derive(Debug)]
pub enum RoomCommand {
    /// Kill every member's session. The room ends once they have all
    /// unregistered.
    SelfDestruct,

    /// Current display names, sorted.
    GetMembers {
        respond_to: oneshot::Sender<Vec<String>>,
    },
}
