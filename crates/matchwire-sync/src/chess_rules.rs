//! Legality engine backed by the `chess` crate.

use std::str::FromStr;

use chess::{Board, BoardStatus, ChessMove, MoveGen, Piece, Rank};
use matchwire_protocol::{Color, PieceKind};

use crate::{AppliedMove, PositionStatus, ProposedMove, Rules, SyncError};

/// Standard chess rules over a [`chess::Board`].
#[derive(Debug, Clone)]
pub struct ChessRules {
    board: Board,
}

impl ChessRules {
    /// The standard starting position.
    pub fn new() -> Self {
        Self {
            board: Board::default(),
        }
    }
}

impl Default for ChessRules {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules for ChessRules {
    fn side_to_move(&self) -> Color {
        match self.board.side_to_move() {
            chess::Color::White => Color::White,
            chess::Color::Black => Color::Black,
        }
    }

    fn try_apply(&mut self, mv: &ProposedMove) -> Option<AppliedMove> {
        let from = chess::Square::from_str(mv.from.as_str()).ok()?;
        let to = chess::Square::from_str(mv.to.as_str()).ok()?;

        let moving_pawn = self.board.piece_on(from) == Some(Piece::Pawn);
        // The promotion choice only attaches when the move promotes;
        // anywhere else it would make a legal move unrecognizable.
        let promotes = moving_pawn && matches!(to.get_rank(), Rank::First | Rank::Eighth);
        let promotion = promotes
            .then(|| to_chess_piece(mv.promotion.unwrap_or(PieceKind::Queen)));

        let candidate = ChessMove::new(from, to, promotion);
        if !MoveGen::new_legal(&self.board).any(|m| m == candidate) {
            return None;
        }

        let captured = self
            .board
            .piece_on(to)
            .map(from_chess_piece)
            .or_else(|| {
                // En passant: a pawn changed file onto an empty square.
                let changed_file = mv.from.as_str().as_bytes()[0] != mv.to.as_str().as_bytes()[0];
                (moving_pawn && changed_file).then_some(PieceKind::Pawn)
            });

        self.board = self.board.make_move_new(candidate);
        Some(AppliedMove { captured })
    }

    fn load(&mut self, fen: &str) -> Result<(), SyncError> {
        self.board =
            Board::from_str(fen).map_err(|e| SyncError::InvalidPosition(e.to_string()))?;
        Ok(())
    }

    fn fen(&self) -> String {
        self.board.to_string()
    }

    fn status(&self) -> PositionStatus {
        match self.board.status() {
            BoardStatus::Ongoing => PositionStatus::Ongoing,
            BoardStatus::Checkmate => PositionStatus::Checkmate,
            BoardStatus::Stalemate => PositionStatus::Stalemate,
        }
    }
}

fn to_chess_piece(kind: PieceKind) -> Piece {
    match kind {
        PieceKind::Pawn => Piece::Pawn,
        PieceKind::Knight => Piece::Knight,
        PieceKind::Bishop => Piece::Bishop,
        PieceKind::Rook => Piece::Rook,
        PieceKind::Queen => Piece::Queen,
        PieceKind::King => Piece::King,
    }
}

fn from_chess_piece(piece: Piece) -> PieceKind {
    match piece {
        Piece::Pawn => PieceKind::Pawn,
        Piece::Knight => PieceKind::Knight,
        Piece::Bishop => PieceKind::Bishop,
        Piece::Rook => PieceKind::Rook,
        Piece::Queen => PieceKind::Queen,
        Piece::King => PieceKind::King,
    }
}

#[cfg(test)]
mod tests {
    use matchwire_protocol::Square;

    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn mv(from: &str, to: &str) -> ProposedMove {
        ProposedMove {
            from: sq(from),
            to: sq(to),
            promotion: None,
        }
    }

    #[test]
    fn test_legal_opening_move_applies() {
        let mut rules = ChessRules::new();
        assert_eq!(rules.side_to_move(), Color::White);

        let applied = rules.try_apply(&mv("e2", "e4")).unwrap();
        assert_eq!(applied.captured, None);
        assert_eq!(rules.side_to_move(), Color::Black);
    }

    #[test]
    fn test_illegal_move_leaves_position_unchanged() {
        let mut rules = ChessRules::new();
        let before = rules.fen();

        assert!(rules.try_apply(&mv("e2", "e5")).is_none());
        assert!(rules.try_apply(&mv("e7", "e5")).is_none(), "wrong side");
        assert_eq!(rules.fen(), before);
    }

    #[test]
    fn test_capture_is_reported() {
        let mut rules = ChessRules::new();
        rules.try_apply(&mv("e2", "e4")).unwrap();
        rules.try_apply(&mv("d7", "d5")).unwrap();

        let applied = rules.try_apply(&mv("e4", "d5")).unwrap();
        assert_eq!(applied.captured, Some(PieceKind::Pawn));
    }

    #[test]
    fn test_en_passant_capture_is_reported() {
        let mut rules = ChessRules::new();
        for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
            rules.try_apply(&mv(from, to)).unwrap();
        }

        // The destination square is empty, but a pawn comes off.
        let applied = rules.try_apply(&mv("e5", "d6")).unwrap();
        assert_eq!(applied.captured, Some(PieceKind::Pawn));
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut rules = ChessRules::new();
        rules.load("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();

        assert!(rules.try_apply(&mv("a7", "a8")).is_some());
        assert!(rules.fen().starts_with("Q7/"));
    }

    #[test]
    fn test_explicit_underpromotion() {
        let mut rules = ChessRules::new();
        rules.load("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();

        let proposed = ProposedMove {
            from: sq("a7"),
            to: sq("a8"),
            promotion: Some(PieceKind::Knight),
        };
        assert!(rules.try_apply(&proposed).is_some());
        assert!(rules.fen().starts_with("N7/"));
    }

    #[test]
    fn test_scholars_mate_is_checkmate() {
        let mut rules = ChessRules::new();
        for (from, to) in [
            ("e2", "e4"),
            ("e7", "e5"),
            ("d1", "h5"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
            ("h5", "f7"),
        ] {
            rules.try_apply(&mv(from, to)).unwrap();
        }
        assert_eq!(rules.status(), PositionStatus::Checkmate);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut rules = ChessRules::new();
        assert!(rules.load("not a position").is_err());
    }
}
