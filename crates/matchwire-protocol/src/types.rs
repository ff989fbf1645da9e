//! Domain primitives shared by every layer of the client.
//!
//! Everything here is either sent on the wire verbatim or derived from
//! wire fields, so the serde representations are part of the protocol:
//! colors and squares serialize as plain strings, ids transparently as
//! their inner value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// RoomId
// ---------------------------------------------------------------------------

/// An opaque room identifier assigned by the server.
///
/// Newtype over the server's string id so a room id can't be confused
/// with a player name or a chat message in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// One of the two player colors. Serializes as `"white"` / `"black"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other color.
    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "white"),
            Self::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A board square in algebraic form (`"e4"`).
///
/// Wire fields carry squares as plain strings; [`Square::from_str`]
/// validates file and rank when a square is built from user input.
/// Server-supplied squares are trusted and deserialized as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Square(String);

impl Square {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Square {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars.next();
        let rank = chars.next();
        match (file, rank, chars.next()) {
            (Some(f @ 'a'..='h'), Some(r @ '1'..='8'), None) => {
                Ok(Self(format!("{f}{r}")))
            }
            _ => Err(ProtocolError::InvalidSquare(s.to_owned())),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// MoveToken
// ---------------------------------------------------------------------------

/// The compact move descriptor sent on the wire: origin square, then
/// destination square, then an optional trailing promotion letter
/// (`"e2e4"`, `"e7e8q"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveToken(String);

impl MoveToken {
    /// Builds a plain two-square token.
    pub fn new(from: &Square, to: &Square) -> Self {
        Self(format!("{from}{to}"))
    }

    /// Builds a token carrying an explicit promotion.
    pub fn with_promotion(from: &Square, to: &Square, piece: PieceKind) -> Self {
        Self(format!("{from}{to}{}", piece.letter()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing promotion letter, if the token is longer than a
    /// plain two-square descriptor.
    pub fn promotion_hint(&self) -> Option<PieceKind> {
        if self.0.len() > 4 {
            self.0.chars().nth(4).and_then(PieceKind::from_letter)
        } else {
            None
        }
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// A chess piece kind, used for promotion choices and capture scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Parses a single-letter piece code as used in move tokens and FEN
    /// (case-insensitive).
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }

    /// The lowercase letter code for this piece.
    pub fn letter(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Material value used by the capture scoreboard. Kings score zero:
    /// they are never actually captured.
    pub fn value(self) -> u32 {
        match self {
            Self::Pawn => 1,
            Self::Knight | Self::Bishop => 3,
            Self::Rook => 5,
            Self::Queen => 9,
            Self::King => 0,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_serializes_transparently() {
        let json = serde_json::to_string(&RoomId::new("ab12")).unwrap();
        assert_eq!(json, "\"ab12\"");
    }

    #[test]
    fn test_room_id_display() {
        assert_eq!(RoomId::new("x9").to_string(), "room-x9");
    }

    #[test]
    fn test_color_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Color::White).unwrap(), "\"white\"");
        assert_eq!(serde_json::to_string(&Color::Black).unwrap(), "\"black\"");
    }

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }

    #[test]
    fn test_square_parses_valid_coordinates() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!(sq.as_str(), "e4");
    }

    #[test]
    fn test_square_rejects_bad_input() {
        assert!("e9".parse::<Square>().is_err());
        assert!("i1".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }

    #[test]
    fn test_move_token_concatenates_squares() {
        let from: Square = "e2".parse().unwrap();
        let to: Square = "e4".parse().unwrap();
        assert_eq!(MoveToken::new(&from, &to).as_str(), "e2e4");
    }

    #[test]
    fn test_move_token_promotion_hint() {
        let from: Square = "e7".parse().unwrap();
        let to: Square = "e8".parse().unwrap();
        let token = MoveToken::with_promotion(&from, &to, PieceKind::Queen);
        assert_eq!(token.as_str(), "e7e8q");
        assert_eq!(token.promotion_hint(), Some(PieceKind::Queen));

        // A plain token implies no promotion.
        assert_eq!(MoveToken::new(&from, &to).promotion_hint(), None);
    }

    #[test]
    fn test_piece_kind_letters_round_trip() {
        for kind in [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ] {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
        }
        assert_eq!(PieceKind::from_letter('x'), None);
    }

    #[test]
    fn test_piece_values() {
        assert_eq!(PieceKind::Pawn.value(), 1);
        assert_eq!(PieceKind::Knight.value(), 3);
        assert_eq!(PieceKind::Bishop.value(), 3);
        assert_eq!(PieceKind::Rook.value(), 5);
        assert_eq!(PieceKind::Queen.value(), 9);
        assert_eq!(PieceKind::King.value(), 0);
    }
}
