//! Error types for the protocol layer.

/// Errors that can occur while building or (de)serializing wire data.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed frame, missing fields, or an
    /// unknown event name.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A square coordinate outside `a1..h8`.
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    /// A frame that parsed but violates protocol rules.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
