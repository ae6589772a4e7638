use crate::transport::Frame;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer closed the connection or the stream ended.
    #[error("connection closed")]
    Closed,

    #[error("operation timed out")]
    Timeout,

    #[error("frame of {0} bytes exceeds the read limit")]
    MessageTooLarge(usize),

    #[error("transport failure: {0}")]
    Io(String),
}

/// Inbound half of a client connection.
#[async_trait]
pub trait FrameReader: Send {
    /// Next frame from the peer. Returns [`TransportError::Closed`] once
    /// the stream has ended.
    async fn read_frame(&mut self) -> Result<Frame, TransportError>;
}

/// Outbound half of a client connection.
#[async_trait]
pub trait FrameWriter: Send {
    /// Queues a frame without flushing it.
    async fn feed(&mut self, frame: Frame) -> Result<(), TransportError>;

    async fn flush(&mut self) -> Result<(), TransportError>;

    async fn send(&mut self, frame: Frame) -> Result<(), TransportError> {
        self.feed(frame).await?;
        self.flush().await
    }

    /// Closes the underlying connection. Reads on the other half end.
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// A client connection split into halves that can live on separate tasks.
pub struct Connection {
    pub reader: Box<dyn FrameReader>,
    pub writer: Box<dyn FrameWriter>,
}

impl Connection {
    pub fn new(reader: impl FrameReader + 'static, writer: impl FrameWriter + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            writer: Box::new(writer),
        }
    }
}
