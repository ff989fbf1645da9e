//! The room phase machine.

use serde::{Deserialize, Serialize};

/// The client-local lifecycle phase of a room.
///
/// Transitions only move forward, and a terminated room is never resumed:
///
/// ```text
/// Uninitialized → Connecting → Joined → Started → Terminated
/// ```
///
/// - **Uninitialized**: no room context exists yet.
/// - **Connecting**: a room id is known (created or taken from the join
///   link) and the channel is being established.
/// - **Joined**: membership confirmed by a `player_joined` broadcast;
///   waiting for the second player.
/// - **Started**: `game_start` received; moves are accepted.
/// - **Terminated**: the game ended or the opponent departed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomPhase {
    Uninitialized,
    Connecting,
    Joined,
    Started,
    Terminated,
}

impl RoomPhase {
    /// Returns `true` once the game is running.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }

    /// Returns `true` once the room is over, for any cause.
    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    fn rank(self) -> u8 {
        match self {
            Self::Uninitialized => 0,
            Self::Connecting => 1,
            Self::Joined => 2,
            Self::Started => 3,
            Self::Terminated => 4,
        }
    }

    /// Returns `true` if moving to `target` goes forward. Retreats are
    /// never valid.
    pub fn can_advance_to(self, target: Self) -> bool {
        target.rank() > self.rank()
    }
}

impl std::fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Joined => write!(f, "Joined"),
            Self::Started => write!(f, "Started"),
            Self::Terminated => write!(f, "Terminated"),
        }
    }
}
