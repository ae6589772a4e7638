use crate::transport::{Connection, Frame, FrameReader, FrameWriter, TransportError};
use async_trait::async_trait;
use axum::Error as AxumError;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};

/// Adapts an upgraded axum WebSocket to the frame traits.
pub struct WsConnection;

impl WsConnection {
    pub fn split(socket: WebSocket) -> Connection {
        let (sink, stream) = socket.split();
        Connection::new(WsReader { stream }, WsWriter { sink })
    }
}

struct WsReader {
    stream: SplitStream<WebSocket>,
}

struct WsWriter {
    sink: SplitSink<WebSocket, Message>,
}

#[async_trait]
impl FrameReader for WsReader {
    async fn read_frame(&mut self) -> Result<Frame, TransportError> {
        match self.stream.next().await {
            Some(Ok(message)) => Ok(from_ws(message)),
            Some(Err(e)) => Err(io_error(e)),
            None => Err(TransportError::Closed),
        }
    }
}

#[async_trait]
impl FrameWriter for WsWriter {
    async fn feed(&mut self, frame: Frame) -> Result<(), TransportError> {
        self.sink.feed(to_ws(frame)).await.map_err(io_error)
    }

    async fn flush(&mut self) -> Result<(), TransportError> {
        self.sink.flush().await.map_err(io_error)
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.sink.close().await.map_err(io_error)
    }
}

fn from_ws(message: Message) -> Frame {
    match message {
        Message::Text(text) => Frame::Text(text.as_str().to_owned()),
        Message::Binary(bytes) => Frame::Binary(bytes),
        Message::Ping(bytes) => Frame::Ping(bytes),
        Message::Pong(bytes) => Frame::Pong(bytes),
        Message::Close(_) => Frame::Close,
    }
}

fn to_ws(frame: Frame) -> Message {
    match frame {
        Frame::Text(text) => Message::Text(text.into()),
        Frame::Binary(bytes) => Message::Binary(bytes),
        Frame::Ping(bytes) => Message::Ping(bytes),
        Frame::Pong(bytes) => Message::Pong(bytes),
        Frame::Close => Message::Close(None),
    }
}

fn io_error(e: AxumError) -> TransportError {
    TransportError::Io(e.to_string())
}
