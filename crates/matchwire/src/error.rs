//! Unified error type for the Matchwire client.

use matchwire_channel::ChannelError;
use matchwire_protocol::ProtocolError;
use matchwire_room::RoomError;
use matchwire_sync::SyncError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `matchwire` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum MatchwireError {
    /// A channel-level error (connect, send, recv).
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (creation failed or timed out).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A synchronization-level error (invalid position).
    #[error(transparent)]
    Sync(#[from] SyncError),
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_from_channel_error() {
        let err = ChannelError::ConnectTimeout(Duration::from_secs(10));
        let top: MatchwireError = err.into();
        assert!(matches!(top, MatchwireError::Channel(_)));
        assert!(top.to_string().contains("timed out"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidSquare("z9".into());
        let top: MatchwireError = err.into();
        assert!(matches!(top, MatchwireError::Protocol(_)));
    }

    #[test]
    fn test_from_room_error() {
        let err = RoomError::CreateFailed("server said no".into());
        let top: MatchwireError = err.into();
        assert!(matches!(top, MatchwireError::Room(_)));
    }

    #[test]
    fn test_from_sync_error() {
        let err = SyncError::InvalidPosition("garbage".into());
        let top: MatchwireError = err.into();
        assert!(matches!(top, MatchwireError::Sync(_)));
    }
}
