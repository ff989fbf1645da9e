//! In-process loopback connection for tests and simulations.
//!
//! [`MemoryConnection::pair`] returns two connected endpoints: frames
//! sent on one side arrive on the other, and closing either side makes
//! the peer's `recv` return `Ok(None)` like a clean network close.

use tokio::sync::{Mutex, mpsc};

use crate::{ChannelError, Connection};

/// One endpoint of an in-memory frame pipe.
pub struct MemoryConnection {
    tx: Mutex<Option<mpsc::UnboundedSender<Vec<u8>>>>,
    rx: Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
}

impl MemoryConnection {
    /// Creates two connected endpoints.
    pub fn pair() -> (Self, Self) {
        let (a_tx, a_rx) = mpsc::unbounded_channel();
        let (b_tx, b_rx) = mpsc::unbounded_channel();
        (
            Self {
                tx: Mutex::new(Some(a_tx)),
                rx: Mutex::new(b_rx),
            },
            Self {
                tx: Mutex::new(Some(b_tx)),
                rx: Mutex::new(a_rx),
            },
        )
    }
}

impl Connection for MemoryConnection {
    async fn send(&self, data: &[u8]) -> Result<(), ChannelError> {
        let guard = self.tx.lock().await;
        let tx = guard.as_ref().ok_or_else(|| {
            ChannelError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "connection closed",
            ))
        })?;
        tx.send(data.to_vec()).map_err(|_| {
            ChannelError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "peer dropped",
            ))
        })
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, ChannelError> {
        Ok(self.rx.lock().await.recv().await)
    }

    async fn close(&self) -> Result<(), ChannelError> {
        // Dropping our sender makes the peer's recv return None.
        self.tx.lock().await.take();
        Ok(())
    }
}
