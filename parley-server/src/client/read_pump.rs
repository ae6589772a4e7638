use crate::client::ClientInfo;
use crate::config::SignalConfig;
use crate::room::RoomHandle;
use crate::transport::{Frame, FrameReader, TransportError};
use parley_core::Message;
use std::sync::Arc;
use tokio::time::{Instant, timeout_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Inbound half of a session: parses what the peer sends and routes it into
/// the room.
///
/// Ends on any read failure, on the rolling read deadline, or when the write
/// side shuts down. Always unregisters the client on the way out.
pub(crate) async fn read_pump(
    mut reader: Box<dyn FrameReader>,
    room: RoomHandle,
    info: Arc<ClientInfo>,
    config: Arc<SignalConfig>,
    shutdown: CancellationToken,
) {
    let mut deadline = Instant::now() + config.pong_wait;

    loop {
        let frame = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            read = timeout_at(deadline, reader.read_frame()) => match read {
                Ok(Ok(frame)) => frame,
                Ok(Err(TransportError::Closed)) => break,
                Ok(Err(e)) => {
                    warn!(error = %e, "unexpected read failure");
                    break;
                }
                Err(_) => {
                    debug!("read deadline expired");
                    break;
                }
            },
        };

        let data = match &frame {
            Frame::Pong(_) => {
                deadline = Instant::now() + config.pong_wait;
                continue;
            }
            Frame::Ping(_) => continue,
            Frame::Close => break,
            Frame::Text(text) => text.as_bytes(),
            Frame::Binary(bytes) => bytes.as_ref(),
        };

        if data.len() > config.max_message_size {
            warn!(len = data.len(), "inbound frame over the read limit");
            break;
        }

        let sanitized = sanitize(data);
        match Message::parse(&sanitized, &info.display_name) {
            Ok(message) if message.needs_broadcast() => room.broadcast(message),
            Ok(message) => room.forward(message),
            Err(e) => debug!(error = %e, "dropping inbound message"),
        }
    }

    room.unregister(info);
    shutdown.cancel();
}

/// Flattens embedded newlines and trims surrounding whitespace.
fn sanitize(data: &[u8]) -> Vec<u8> {
    data.trim_ascii()
        .iter()
        .map(|&b| if b == b'\n' { b' ' } else { b })
        .collect()
}
