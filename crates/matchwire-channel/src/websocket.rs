//! WebSocket connection implementation using `tokio-tungstenite`.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;

use crate::{ChannelError, Connection};

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// A WebSocket-based [`Connection`] dialed out to the room server.
pub struct WebSocketChannel {
    ws: Arc<Mutex<WsStream>>,
}

impl WebSocketChannel {
    /// Dials the given `ws://` / `wss://` URL.
    pub async fn connect(url: &str) -> Result<Self, ChannelError> {
        let (ws, _) = tokio_tungstenite::connect_async(url).await.map_err(|e| {
            ChannelError::ConnectFailed(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                e,
            ))
        })?;
        tracing::debug!(url, "WebSocket channel connected");
        Ok(Self {
            ws: Arc::new(Mutex::new(ws)),
        })
    }
}

impl Connection for WebSocketChannel {
    async fn send(&self, data: &[u8]) -> Result<(), ChannelError> {
        use futures_util::SinkExt;
        let msg = Message::Binary(data.to_vec().into());
        self.ws.lock().await.send(msg).await.map_err(|e| {
            ChannelError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, ChannelError> {
        use futures_util::StreamExt;
        loop {
            let msg = self.ws.lock().await.next().await;
            match msg {
                Some(Ok(Message::Binary(data))) => return Ok(Some(data.into())),
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // skip ping/pong/frame
                Some(Err(e)) => {
                    return Err(ChannelError::ReceiveFailed(std::io::Error::new(
                        std::io::ErrorKind::ConnectionReset,
                        e,
                    )));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), ChannelError> {
        self.ws.lock().await.close(None).await.map_err(|e| {
            ChannelError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }
}
