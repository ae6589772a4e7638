use crate::config::SignalConfig;
use crate::transport::{Frame, FrameWriter, TransportError};
use bytes::Bytes;
use parley_core::Message;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Instant, interval_at, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Outbound half of a session and the only task that writes to the
/// connection.
///
/// A closed queue means the room let go of the client: a close frame is
/// sent. A kill stops the pump on the spot, without flushing or closing
/// politely.
pub(crate) async fn write_pump(
    mut writer: Box<dyn FrameWriter>,
    mut outbound: mpsc::Receiver<Arc<Message>>,
    kill: CancellationToken,
    shutdown: CancellationToken,
    config: Arc<SignalConfig>,
) {
    let mut ping = interval_at(Instant::now() + config.ping_period, config.ping_period);

    let killed = loop {
        let result = tokio::select! {
            biased;
            _ = kill.cancelled() => break true,
            next = outbound.recv() => match next {
                Some(message) => {
                    tokio::select! {
                        biased;
                        _ = kill.cancelled() => break true,
                        sent = write_burst(writer.as_mut(), &mut outbound, message, &config) => sent,
                    }
                }
                None => {
                    let _ = timeout(config.write_wait, writer.send(Frame::Close)).await;
                    break false;
                }
            },
            _ = ping.tick() => {
                match timeout(config.write_wait, writer.send(Frame::Ping(Bytes::new()))).await {
                    Ok(sent) => sent,
                    Err(_) => Err(TransportError::Timeout),
                }
            }
        };

        if let Err(e) = result {
            debug!(error = %e, "write failed");
            break false;
        }
    };

    // A killed session is torn down by dropping the writer, never closed.
    if !killed {
        let _ = timeout(config.write_wait, writer.close()).await;
    }
    drop(writer);
    shutdown.cancel();
}

/// Writes `first` plus whatever was already queued behind it, then flushes
/// once.
async fn write_burst(
    writer: &mut dyn FrameWriter,
    outbound: &mut mpsc::Receiver<Arc<Message>>,
    first: Arc<Message>,
    config: &SignalConfig,
) -> Result<(), TransportError> {
    let burst = async {
        feed(writer, &first).await?;
        for _ in 0..outbound.len() {
            match outbound.try_recv() {
                Ok(message) => feed(writer, &message).await?,
                Err(_) => break,
            }
        }
        writer.flush().await
    };

    timeout(config.write_wait, burst)
        .await
        .unwrap_or(Err(TransportError::Timeout))
}

async fn feed(writer: &mut dyn FrameWriter, message: &Message) -> Result<(), TransportError> {
    match message.build() {
        Ok(text) => writer.feed(Frame::Text(text)).await,
        Err(e) => {
            warn!(error = %e, "skipping unencodable message");
            Ok(())
        }
    }
}
