use thiserror::Error;

/// Errors from the synchronization engine itself.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

/// Why a locally initiated move was not accepted.
///
/// None of these carry a network effect: a rejected move makes no state
/// change and no send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("the game has not started")]
    NotStarted,

    #[error("not your turn")]
    NotYourTurn,

    #[error("illegal move")]
    IllegalMove,

    #[error("the game is over")]
    GameFinished,
}
