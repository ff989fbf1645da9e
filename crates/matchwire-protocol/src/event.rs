//! Wire events: everything the server broadcasts and everything the
//! client emits, one JSON frame per event.
//!
//! Frames are adjacently tagged: `{"event": "move_made", "data": {...}}`.
//! The event name doubles as the subscription key on the client's
//! dispatch surface, so [`ServerEvent::kind`] exposes it as a cheap
//! `Copy` discriminant.

use serde::{Deserialize, Serialize};

use crate::{Color, MoveToken, RoomId, Square};

// ---------------------------------------------------------------------------
// Server → client payloads
// ---------------------------------------------------------------------------

/// One entry in a `player_joined` roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub color: Color,
    pub name: String,
}

/// Broadcast whenever a player enters the room. Carries the full roster
/// so late deliveries and re-deliveries are self-contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerJoined {
    pub players: Vec<PlayerEntry>,
    /// Color of the player this broadcast is about.
    pub color: Color,
    /// Name of the player this broadcast is about.
    pub name: String,
    pub players_count: u8,
}

/// Broadcast once when occupancy reaches two. The position and variant
/// tag here are authoritative and overwrite any provisional local state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStart {
    pub fen: String,
    pub variant_state: String,
}

/// Broadcast after the server accepts a move from either player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveMade {
    pub from: Square,
    pub to: Square,
    /// The full move token; longer than four characters when it carries
    /// a trailing promotion letter.
    #[serde(rename = "move")]
    pub token: MoveToken,
    /// Canonical position after the move, used for resync.
    pub fen: String,
    /// The side to move *after* this move was applied.
    pub turn: Color,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Checkmate,
    /// Any non-decisive result string the server may send.
    #[serde(other)]
    Other,
}

/// Terminal broadcast. Decisive results carry the winner's color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub result: ResultKind,
    #[serde(default)]
    pub winner: Option<Color>,
}

/// Broadcast when the other player's connection to the room ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLeft {
    pub name: String,
    pub color: Color,
}

/// A chat line relayed to every participant, the sender included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBroadcast {
    pub sender: String,
    pub color: Color,
    pub message: String,
}

/// A server-reported error, surfaced verbatim to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNotice {
    pub message: String,
}

// ---------------------------------------------------------------------------
// ServerEvent
// ---------------------------------------------------------------------------

/// Every event the client consumes.
///
/// `Disconnect` never travels on the wire; the channel session
/// synthesizes it when the underlying connection closes, so the rest of
/// the client handles connection loss like any other event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    PlayerJoined(PlayerJoined),
    GameStart(GameStart),
    MoveMade(MoveMade),
    GameOver(GameOver),
    PlayerLeft(PlayerLeft),
    ChatMessage(ChatBroadcast),
    Error(ErrorNotice),
    Disconnect,
}

impl ServerEvent {
    /// The discriminant used as a subscription key by the event bus.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PlayerJoined(_) => EventKind::PlayerJoined,
            Self::GameStart(_) => EventKind::GameStart,
            Self::MoveMade(_) => EventKind::MoveMade,
            Self::GameOver(_) => EventKind::GameOver,
            Self::PlayerLeft(_) => EventKind::PlayerLeft,
            Self::ChatMessage(_) => EventKind::ChatMessage,
            Self::Error(_) => EventKind::Error,
            Self::Disconnect => EventKind::Disconnect,
        }
    }
}

/// Payload-free discriminant of [`ServerEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PlayerJoined,
    GameStart,
    MoveMade,
    GameOver,
    PlayerLeft,
    ChatMessage,
    Error,
    Disconnect,
}

// ---------------------------------------------------------------------------
// ClientEvent
// ---------------------------------------------------------------------------

/// Every event the client emits. All sends are fire-and-forget; the
/// server's broadcasts are the only acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    Join {
        room_id: RoomId,
        name: String,
    },
    Move {
        room_id: RoomId,
        #[serde(rename = "move")]
        token: MoveToken,
        color: Color,
    },
    ChatMessage {
        room_id: RoomId,
        message: String,
    },
}

// =========================================================================
// Tests
// =========================================================================
