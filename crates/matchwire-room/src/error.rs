use std::time::Duration;

use thiserror::Error;

/// Errors from room entry.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("room creation failed: {0}")]
    CreateFailed(String),

    #[error("room creation timed out after {0:?}")]
    CreateTimedOut(Duration),
}
