//! Capture scoring keyed by piece identity.
//!
//! Every piece on the seeded position gets a stable id. Ids follow their
//! pieces square to square (castling and en passant included), so each
//! capture can be credited to the individual piece that made it, feeding
//! a per-piece leaderboard next to the per-color totals.

use std::collections::HashMap;

use matchwire_protocol::{Color, PieceKind, Square};

use crate::SyncError;

/// Material value of one side's full starting set, king excluded.
const STARTING_MATERIAL: u32 = 39;

/// Stable identity of one piece, assigned when the position is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u16);

#[derive(Debug, Clone)]
struct Tally {
    color: Color,
    kind: PieceKind,
    points: u32,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceStanding {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceKind,
    pub points: u32,
}

/// Capture totals per color plus per-piece tallies.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    occupants: HashMap<String, PieceId>,
    pieces: Vec<Tally>,
    white_total: u32,
    black_total: u32,
}

impl ScoreBoard {
    /// Seeds identities from a position.
    ///
    /// The color totals are recovered from the material missing against
    /// a full starting set (saturating, since promotions inflate
    /// material); per-piece attribution before this point is lost, which
    /// only matters when the incremental trail was discarded by a
    /// resync.
    pub fn from_fen(fen: &str) -> Result<Self, SyncError> {
        let board = fen
            .split_whitespace()
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| SyncError::InvalidPosition(fen.to_owned()))?;

        let mut score = Self::default();
        let mut white_remaining = 0u32;
        let mut black_remaining = 0u32;

        for (row, rank_text) in board.split('/').enumerate() {
            let rank = 8usize
                .checked_sub(row)
                .ok_or_else(|| SyncError::InvalidPosition(fen.to_owned()))?;
            let mut file = 0usize;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let kind = PieceKind::from_letter(c)
                    .ok_or_else(|| SyncError::InvalidPosition(fen.to_owned()))?;
                let color = if c.is_ascii_uppercase() {
                    white_remaining += kind.value();
                    Color::White
                } else {
                    black_remaining += kind.value();
                    Color::Black
                };
                let square = format!("{}{rank}", (b'a' + file as u8) as char);
                let id = PieceId(score.pieces.len() as u16);
                score.pieces.push(Tally {
                    color,
                    kind,
                    points: 0,
                });
                score.occupants.insert(square, id);
                file += 1;
            }
        }

        score.white_total = STARTING_MATERIAL.saturating_sub(black_remaining);
        score.black_total = STARTING_MATERIAL.saturating_sub(white_remaining);
        Ok(score)
    }

    /// Tracks one applied move: moves the piece's id, removes the
    /// captured piece (en passant included), credits the mover, and
    /// follows the rook through a castle.
    ///
    /// `by` is the moving side, `captured` is what the legality engine
    /// reported, `promotion` is consulted only when a pawn reaches the
    /// last rank.
    pub fn apply_move(
        &mut self,
        by: Color,
        from: &Square,
        to: &Square,
        captured: Option<PieceKind>,
        promotion: Option<PieceKind>,
    ) {
        if let Some(piece) = captured {
            let value = piece.value();
            match by {
                Color::White => self.white_total += value,
                Color::Black => self.black_total += value,
            }

            if self.occupants.remove(to.as_str()).is_none() && piece == PieceKind::Pawn {
                // En passant: the captured pawn sits on the origin rank,
                // not on the destination square.
                let ep_square = cross_square(to, from);
                self.occupants.remove(&ep_square);
            }
        }

        let Some(id) = self.occupants.remove(from.as_str()) else {
            return;
        };
        let tally = &mut self.pieces[id.0 as usize];
        if let Some(piece) = captured {
            tally.points += piece.value();
        }

        let kind = tally.kind;
        if kind == PieceKind::Pawn && to.as_str().ends_with(['1', '8']) {
            tally.kind = promotion.unwrap_or(PieceKind::Queen);
        }
        self.occupants.insert(to.as_str().to_owned(), id);

        if kind == PieceKind::King {
            self.follow_castling_rook(from, to);
        }
    }

    pub fn points(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_total,
            Color::Black => self.black_total,
        }
    }

    /// The color ahead on captures, if any.
    pub fn leader(&self) -> Option<Color> {
        match self.white_total.cmp(&self.black_total) {
            std::cmp::Ordering::Greater => Some(Color::White),
            std::cmp::Ordering::Less => Some(Color::Black),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Pieces with at least one capture, best scorer first.
    pub fn leaderboard(&self) -> Vec<PieceStanding> {
        let mut standings: Vec<PieceStanding> = self
            .pieces
            .iter()
            .enumerate()
            .filter(|(_, tally)| tally.points > 0)
            .map(|(i, tally)| PieceStanding {
                id: PieceId(i as u16),
                color: tally.color,
                kind: tally.kind,
                points: tally.points,
            })
            .collect();
        standings.sort_by(|a, b| b.points.cmp(&a.points));
        standings
    }

    fn follow_castling_rook(&mut self, from: &Square, to: &Square) {
        let (from_file, to_file) = (file_of(from), file_of(to));
        let rank = &from.as_str()[1..2];
        let (rook_from, rook_to) = match (from_file, to_file) {
            ('e', 'g') => (format!("h{rank}"), format!("f{rank}")),
            ('e', 'c') => (format!("a{rank}"), format!("d{rank}")),
            _ => return,
        };
        if let Some(rook) = self.occupants.remove(&rook_from) {
            self.occupants.insert(rook_to, rook);
        }
    }
}

fn file_of(square: &Square) -> char {
    square.as_str().as_bytes()[0] as char
}

/// The square with `a`'s file and `b`'s rank.
fn cross_square(a: &Square, b: &Square) -> String {
    format!("{}{}", file_of(a), &b.as_str()[1..2])
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_seeding_the_starting_position() {
        let score = ScoreBoard::from_fen(START_FEN).unwrap();
        assert_eq!(score.pieces.len(), 32);
        assert_eq!(score.points(Color::White), 0);
        assert_eq!(score.points(Color::Black), 0);
        assert!(score.leaderboard().is_empty());
    }

    #[test]
    fn test_capture_credits_the_capturing_piece() {
        let mut score = ScoreBoard::from_fen(START_FEN).unwrap();
        score.apply_move(Color::White, &sq("e2"), &sq("e4"), None, None);
        score.apply_move(Color::Black, &sq("d7"), &sq("d5"), None, None);
        score.apply_move(Color::White, &sq("e4"), &sq("d5"), Some(PieceKind::Pawn), None);

        assert_eq!(score.points(Color::White), 1);
        assert_eq!(score.points(Color::Black), 0);
        assert_eq!(score.leader(), Some(Color::White));

        let board = score.leaderboard();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].kind, PieceKind::Pawn);
        assert_eq!(board[0].color, Color::White);
        assert_eq!(board[0].points, 1);
    }

    #[test]
    fn test_identity_follows_the_piece_across_moves() {
        let mut score = ScoreBoard::from_fen(START_FEN).unwrap();
        score.apply_move(Color::White, &sq("g1"), &sq("f3"), None, None);
        score.apply_move(Color::Black, &sq("e7"), &sq("e5"), None, None);
        score.apply_move(Color::White, &sq("f3"), &sq("e5"), Some(PieceKind::Pawn), None);

        let board = score.leaderboard();
        assert_eq!(board[0].kind, PieceKind::Knight);
        assert_eq!(board[0].points, 1);
    }

    #[test]
    fn test_en_passant_removes_the_bypassed_pawn() {
        let mut score = ScoreBoard::from_fen(START_FEN).unwrap();
        score.apply_move(Color::White, &sq("e2"), &sq("e4"), None, None);
        score.apply_move(Color::Black, &sq("a7"), &sq("a6"), None, None);
        score.apply_move(Color::White, &sq("e4"), &sq("e5"), None, None);
        score.apply_move(Color::Black, &sq("d7"), &sq("d5"), None, None);
        score.apply_move(Color::White, &sq("e5"), &sq("d6"), Some(PieceKind::Pawn), None);

        assert_eq!(score.points(Color::White), 1);
        // The captured pawn's square (d5) is empty now.
        assert!(!score.occupants.contains_key("d5"));
        assert!(score.occupants.contains_key("d6"));
    }

    #[test]
    fn test_castling_moves_the_rook_id_too() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut score = ScoreBoard::from_fen(fen).unwrap();
        let rook = score.occupants["h1"];

        score.apply_move(Color::White, &sq("e1"), &sq("g1"), None, None);

        assert_eq!(score.occupants.get("f1"), Some(&rook));
        assert!(!score.occupants.contains_key("h1"));
    }

    #[test]
    fn test_promotion_changes_the_tracked_kind() {
        let fen = "8/P6k/8/8/8/8/8/K7 w - - 0 1";
        let mut score = ScoreBoard::from_fen(fen).unwrap();
        score.apply_move(Color::White, &sq("a7"), &sq("a8"), None, None);

        let id = score.occupants["a8"];
        assert_eq!(score.pieces[id.0 as usize].kind, PieceKind::Queen);
    }

    #[test]
    fn test_from_fen_recovers_totals_from_missing_material() {
        // Black is missing a queen and a pawn; white is missing a rook.
        let fen = "rnb1kbnr/ppppppp1/8/8/8/8/PPPPPPPP/1NBQKBNR w Kkq - 0 1";
        let score = ScoreBoard::from_fen(fen).unwrap();
        assert_eq!(score.points(Color::White), 10);
        assert_eq!(score.points(Color::Black), 5);
    }

    #[test]
    fn test_from_fen_rejects_garbage() {
        assert!(ScoreBoard::from_fen("").is_err());
        assert!(ScoreBoard::from_fen("xyz?! w - -").is_err());
    }
}
