//! Error types for the channel layer.

use std::time::Duration;

/// Errors that can occur on the client's channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Dialing the server failed.
    #[error("connect failed: {0}")]
    ConnectFailed(std::io::Error),

    /// The connect attempt exceeded the configured timeout.
    #[error("connect timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// Sending a frame failed (the connection is gone).
    #[error("send failed: {0}")]
    SendFailed(std::io::Error),

    /// Receiving a frame failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(std::io::Error),
}
