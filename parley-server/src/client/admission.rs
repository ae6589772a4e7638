use crate::client::read_pump::read_pump;
use crate::client::write_pump::write_pump;
use crate::client::{ClientEntry, ClientInfo};
use crate::config::SignalConfig;
use crate::error::JoinError;
use crate::room::{JoinRequest, RegistryHandle, RoomHandle};
use crate::transport::{Connection, Frame, FrameReader, FrameWriter};
use parley_core::{AuthHandshake, Message, is_valid_display_name, is_valid_room_key};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, timeout, timeout_at};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info_span, warn};

/// Runs the join handshake on a fresh connection and, once the room has
/// accepted the client, hands the connection over to its pumps.
///
/// Every failure except [`JoinError::ConnectionLost`] is reported to the
/// peer as an `error` message followed by a close frame.
pub(crate) async fn admit(registry: &RegistryHandle, conn: Connection) -> Result<(), JoinError> {
    let Connection {
        mut reader,
        mut writer,
    } = conn;
    let config = registry.config();

    let result = handshake(registry, reader.as_mut(), &config).await;
    let (room, info, mut outbound, kill) = match result {
        Ok(joined) => joined,
        Err(err) => {
            reject(writer.as_mut(), err, &config).await;
            return Err(err);
        }
    };

    let span = info_span!(
        "client",
        room_id = %room.room_id(),
        client = %info.display_name,
    );

    // The room queues the roster right after acknowledging the join.
    if let Ok(Some(roster)) = timeout(config.join_ack_wait, outbound.recv()).await {
        if let Ok(text) = roster.build() {
            let sent = timeout(config.write_wait, writer.send(Frame::Text(text))).await;
            if !matches!(sent, Ok(Ok(()))) {
                debug!(parent: &span, "roster delivery failed");
            }
        }
    }

    let shutdown = kill.child_token();
    tokio::spawn(
        read_pump(
            reader,
            room,
            info,
            Arc::clone(&config),
            shutdown.clone(),
        )
        .instrument(span.clone()),
    );
    tokio::spawn(write_pump(writer, outbound, kill, shutdown, config).instrument(span));

    Ok(())
}

type Joined = (
    RoomHandle,
    Arc<ClientInfo>,
    mpsc::Receiver<Arc<Message>>,
    CancellationToken,
);

async fn handshake(
    registry: &RegistryHandle,
    reader: &mut dyn FrameReader,
    config: &SignalConfig,
) -> Result<Joined, JoinError> {
    let raw = read_auth(reader, config).await?;

    let auth = AuthHandshake::decode(&raw).map_err(|_| JoinError::CanNotJoinRoom)?;
    if !is_valid_room_key(&auth.client_key) {
        return Err(JoinError::NotAValidKey);
    }
    if !is_valid_display_name(&auth.display_name) {
        return Err(JoinError::NotAValidName);
    }

    let room = registry
        .lookup(&auth.room_id)
        .await
        .ok()
        .flatten()
        .ok_or(JoinError::CanNotJoinRoom)?;

    let info = Arc::new(ClientInfo {
        client_key: auth.client_key,
        display_name: auth.display_name,
    });
    let (tx, outbound) = mpsc::channel(config.outbound_capacity);
    let kill = CancellationToken::new();
    let (joined_tx, joined_rx) = oneshot::channel();

    room.register(JoinRequest {
        entry: ClientEntry::new(Arc::clone(&info), tx, kill.clone()),
        joined: joined_tx,
    });

    match timeout(config.join_ack_wait, joined_rx).await {
        Ok(Ok(true)) => Ok((room, info, outbound, kill)),
        Ok(Ok(false)) => Err(JoinError::NameIsAlreadyInUse),
        Ok(Err(_)) => Err(JoinError::CanNotJoinRoom),
        Err(_) => {
            // The room may still have admitted us right at the deadline.
            kill.cancel();
            room.unregister(info);
            Err(JoinError::CanNotJoinRoom)
        }
    }
}

/// Reads the first data frame, skipping keepalives.
async fn read_auth(
    reader: &mut dyn FrameReader,
    config: &SignalConfig,
) -> Result<Vec<u8>, JoinError> {
    let deadline = Instant::now() + config.auth_wait;

    loop {
        let frame = match timeout_at(deadline, reader.read_frame()).await {
            Ok(Ok(frame)) => frame,
            Ok(Err(e)) => {
                debug!(error = %e, "connection lost before handshake");
                return Err(JoinError::ConnectionLost);
            }
            Err(_) => {
                debug!("handshake timed out");
                return Err(JoinError::ConnectionLost);
            }
        };

        match frame.data() {
            Some(data) if data.len() > config.max_message_size => {
                return Err(JoinError::ConnectionLost);
            }
            Some(data) => return Ok(data.to_vec()),
            None if frame == Frame::Close => return Err(JoinError::ConnectionLost),
            None => continue,
        }
    }
}

async fn reject(writer: &mut dyn FrameWriter, err: JoinError, config: &SignalConfig) {
    if err.is_reported_to_peer() {
        match Message::error(&err).build() {
            Ok(text) => {
                let report = async {
                    writer.feed(Frame::Text(text)).await?;
                    writer.feed(Frame::Close).await?;
                    writer.flush().await
                };
                if !matches!(timeout(config.write_wait, report).await, Ok(Ok(()))) {
                    debug!(%err, "could not report join failure");
                }
            }
            Err(e) => warn!(error = %e, "failed to encode join error"),
        }
    }

    let _ = timeout(config.write_wait, writer.close()).await;
}
