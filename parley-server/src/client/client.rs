use parley_core::Message;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Identity of an admitted client.
///
/// Sessions compare by `Arc` pointer, never by value: a reconnect with the
/// same key and name is a different session.
#[derive(Debug)]
pub struct ClientInfo {
    pub client_key: String,
    pub display_name: String,
}

/// What a room holds for each member.
#[derive(Debug, Clone)]
pub struct ClientEntry {
    pub info: Arc<ClientInfo>,
    outbound: mpsc::Sender<Arc<Message>>,
    kill: CancellationToken,
}

/// Why a message could not be queued for a client.
#[derive(Debug, PartialEq, Eq)]
pub enum DeliveryError {
    Full,
    Closed,
}

impl ClientEntry {
    pub fn new(
        info: Arc<ClientInfo>,
        outbound: mpsc::Sender<Arc<Message>>,
        kill: CancellationToken,
    ) -> Self {
        Self {
            info,
            outbound,
            kill,
        }
    }

    pub fn client_key(&self) -> &str {
        &self.info.client_key
    }

    pub fn display_name(&self) -> &str {
        &self.info.display_name
    }

    /// Queues a message without waiting.
    pub fn deliver(&self, message: Arc<Message>) -> Result<(), DeliveryError> {
        self.outbound.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryError::Full,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }

    /// Tears the session down: the write pump stops without flushing and
    /// the read pump follows.
    pub fn kill(&self) {
        self.kill.cancel();
    }

    pub fn is(&self, info: &Arc<ClientInfo>) -> bool {
        Arc::ptr_eq(&self.info, info)
    }
}
