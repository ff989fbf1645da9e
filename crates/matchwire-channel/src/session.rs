//! The channel session: connect-once lifetime of the one connection.
//!
//! The session is created lazily on first need and lives for the page's
//! lifetime. It connects at most once, never reconnects, and never
//! buffers: emits while disconnected are dropped with a warning, and a
//! vanished connection surfaces exactly one synthesized
//! [`ServerEvent::Disconnect`] before the event stream ends.

use std::time::Duration;

use matchwire_protocol::{ClientEvent, Codec, JsonCodec, ServerEvent};

use crate::{ChannelError, Connection};

/// Tunables for the channel session.
///
/// A dial that never completes would leave the page pending forever, so
/// the attempt is bounded and surfaces [`ChannelError::ConnectTimeout`].
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    pub connect_timeout: Duration,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Owns the single persistent connection to the room server.
pub struct ChannelSession<C: Connection> {
    conn: Option<C>,
    connected: bool,
    codec: JsonCodec,
    config: ChannelConfig,
}

impl<C: Connection> ChannelSession<C> {
    pub fn new(config: ChannelConfig) -> Self {
        Self {
            conn: None,
            connected: false,
            codec: JsonCodec,
            config,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Establishes the connection if there is none yet.
    ///
    /// Idempotent: returns `Ok(false)` without dialing when already
    /// connected, `Ok(true)` after a fresh connect. The dial is bounded
    /// by [`ChannelConfig::connect_timeout`].
    pub async fn connect_once<F, Fut>(&mut self, dial: F) -> Result<bool, ChannelError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, ChannelError>>,
    {
        if self.connected {
            return Ok(false);
        }

        let conn = tokio::time::timeout(self.config.connect_timeout, dial())
            .await
            .map_err(|_| ChannelError::ConnectTimeout(self.config.connect_timeout))??;

        self.conn = Some(conn);
        self.connected = true;
        tracing::info!("channel connected");
        Ok(true)
    }

    /// Sends one event, fire-and-forget.
    ///
    /// While disconnected the event is dropped with a warning; there is
    /// no buffering and no acknowledgment tracking. A failed send marks
    /// the session disconnected; the loss itself is reported through the
    /// synthesized disconnect on the receive side.
    pub async fn emit(&mut self, event: &ClientEvent) {
        if !self.connected {
            tracing::warn!(?event, "dropping emit while disconnected");
            return;
        }
        let Some(conn) = &self.conn else {
            return;
        };

        let frame = match self.codec.encode(event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode outbound event");
                return;
            }
        };

        if let Err(e) = conn.send(&frame).await {
            tracing::warn!(error = %e, "send failed, marking channel disconnected");
            self.connected = false;
        }
    }

    /// Receives the next server event.
    ///
    /// Malformed frames are logged and skipped. When the connection
    /// closes or errors, one [`ServerEvent::Disconnect`] is returned and
    /// the session goes (and stays) disconnected; afterwards this
    /// returns `None`.
    pub async fn next_event(&mut self) -> Option<ServerEvent> {
        loop {
            if !self.connected {
                return None;
            }
            let conn = self.conn.as_ref()?;

            match conn.recv().await {
                Ok(Some(frame)) => match self.codec.decode::<ServerEvent>(&frame) {
                    Ok(event) => return Some(event),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping undecodable frame");
                    }
                },
                Ok(None) => {
                    tracing::info!("channel closed by server");
                    self.connected = false;
                    return Some(ServerEvent::Disconnect);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "receive failed");
                    self.connected = false;
                    return Some(ServerEvent::Disconnect);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryConnection;
    use matchwire_protocol::RoomId;

    fn join_event() -> ClientEvent {
        ClientEvent::Join {
            room_id: RoomId::new("r1"),
            name: "alice".into(),
        }
    }

    async fn connected_session() -> (ChannelSession<MemoryConnection>, MemoryConnection) {
        let (client, server) = MemoryConnection::pair();
        let mut session = ChannelSession::new(ChannelConfig::default());
        session
            .connect_once(|| async move { Ok(client) })
            .await
            .unwrap();
        (session, server)
    }

    #[tokio::test]
    async fn test_connect_once_is_idempotent() {
        let (mut session, _server) = connected_session().await;
        assert!(session.is_connected());

        // Second attempt must not dial at all.
        let result = session
            .connect_once(|| async move {
                panic!("dialed twice");
                #[allow(unreachable_code)]
                Ok(MemoryConnection::pair().0)
            })
            .await
            .unwrap();
        assert!(!result);
    }

    #[tokio::test]
    async fn test_emit_reaches_the_peer_as_a_frame() {
        let (mut session, server) = connected_session().await;
        session.emit(&join_event()).await;

        let frame = server.recv().await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&frame).unwrap();
        assert_eq!(json["event"], "join");
        assert_eq!(json["data"]["room_id"], "r1");
    }

    #[tokio::test]
    async fn test_emit_while_disconnected_is_dropped() {
        let mut session: ChannelSession<MemoryConnection> =
            ChannelSession::new(ChannelConfig::default());
        // Never connected: the emit must be a silent no-op.
        session.emit(&join_event()).await;
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn test_close_synthesizes_single_disconnect() {
        let (mut session, server) = connected_session().await;
        server.close().await.unwrap();

        assert_eq!(session.next_event().await, Some(ServerEvent::Disconnect));
        assert!(!session.is_connected());
        assert_eq!(session.next_event().await, None);
    }

    #[tokio::test]
    async fn test_undecodable_frames_are_skipped() {
        let (mut session, server) = connected_session().await;
        server.send(b"garbage").await.unwrap();
        server
            .send(br#"{"event": "disconnect"}"#)
            .await
            .unwrap();

        // The garbage frame is skipped; the next valid one is delivered.
        assert_eq!(session.next_event().await, Some(ServerEvent::Disconnect));
    }
}
