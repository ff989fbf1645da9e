//! Move synchronization for the Matchwire client.
//!
//! The engine owns turn-taking from `game_start` to the terminal state:
//! it gates locally initiated moves on turn authority, applies them
//! optimistically through a [`Rules`] collaborator, and reconciles
//! against the server's authoritative `move_made` broadcasts. When a
//! local replay of an authoritative move fails, the engine discards its
//! incremental state and adopts the broadcast's canonical position,
//! so the client can never stay diverged from the server.
//!
//! The [`Rules`] trait is the seam to the legality engine. A real
//! implementation backed by the `chess` crate ships behind the
//! `chess-rules` feature; tests script their own.

mod engine;
mod error;
mod rules;
mod score;

#[cfg(feature = "chess-rules")]
mod chess_rules;

pub use engine::{Outcome, RemoteUpdate, SyncEngine};
pub use error::{MoveRejection, SyncError};
pub use rules::{AppliedMove, PositionStatus, ProposedMove, Rules};
pub use score::{PieceId, PieceStanding, ScoreBoard};

#[cfg(feature = "chess-rules")]
pub use chess_rules::ChessRules;
