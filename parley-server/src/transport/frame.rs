use bytes::Bytes;

/// One unit of traffic on a client connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Bytes),
    Ping(Bytes),
    Pong(Bytes),
    Close,
}

impl Frame {
    /// Payload of a data frame; control frames carry none.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            Frame::Text(text) => Some(text.as_bytes()),
            Frame::Binary(bytes) => Some(bytes),
            Frame::Ping(_) | Frame::Pong(_) | Frame::Close => None,
        }
    }
}
