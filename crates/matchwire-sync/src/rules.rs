//! The seam to the move-legality engine.

use matchwire_protocol::{Color, PieceKind, Square};

use crate::SyncError;

/// A move as proposed to the legality engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedMove {
    pub from: Square,
    pub to: Square,
    /// Promotion choice, consulted only when the move actually promotes.
    /// The engine fills in queen when the player did not pick one.
    pub promotion: Option<PieceKind>,
}

/// What the legality engine reports after applying a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The piece removed from the board, en passant included.
    pub captured: Option<PieceKind>,
}

/// Terminal evaluation of the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    Ongoing,
    /// The side to move is mated.
    Checkmate,
    Stalemate,
}

/// Validates and applies moves against the game rules.
///
/// Implementations hold the current position. `try_apply` either
/// mutates the position and reports the result, or leaves it untouched
/// and returns `None`; there is no partially applied state.
pub trait Rules {
    /// The color whose move is currently valid.
    fn side_to_move(&self) -> Color;

    /// Applies the move if legal. Returns `None` for an illegal move,
    /// with the position unchanged.
    fn try_apply(&mut self, mv: &ProposedMove) -> Option<AppliedMove>;

    /// Replaces the position with the given FEN.
    fn load(&mut self, fen: &str) -> Result<(), SyncError>;

    /// The current position in FEN.
    fn fen(&self) -> String;

    /// Terminal evaluation of the current position.
    fn status(&self) -> PositionStatus;
}
