//! The synchronization engine: turn gating, optimistic application, and
//! reconciliation against authoritative broadcasts.

use matchwire_protocol::{
    ClientEvent, Color, GameOver, MoveMade, MoveToken, PieceKind, RoomId, Square,
};

use crate::{MoveRejection, PositionStatus, ProposedMove, Rules, ScoreBoard, SyncError};

/// How a finished game reads from the local player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    /// The opponent departed mid-game. No winner.
    Abandoned,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
            Self::Draw => write!(f, "draw"),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// What happened when an authoritative `move_made` broadcast arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteUpdate {
    /// The broadcast mirrors the local player's own just-sent move,
    /// which is already applied. Nothing changes.
    Echo,
    /// The broadcast arrived before the game started or after it ended.
    Ignored,
    /// The opponent's move is now reflected locally.
    Applied {
        your_turn: bool,
        /// `true` when local replay failed and the canonical position
        /// was adopted wholesale.
        resynced: bool,
        ended: Option<Outcome>,
    },
}

/// Owns turn-taking for one game.
///
/// Construction happens on `game_start`; the engine is discarded with
/// the room. All position mutation goes through the [`Rules`]
/// collaborator, so the engine itself only tracks bookkeeping that the
/// rules cannot derive: history, last move, capture scores, and the
/// terminal flag.
#[derive(Debug)]
pub struct SyncEngine<R: Rules> {
    room_id: RoomId,
    local_color: Color,
    rules: R,
    /// Current position. After a resync this is the server's FEN
    /// verbatim, not a re-rendering of it.
    position: String,
    history: Vec<MoveToken>,
    last_move: Option<(Square, Square)>,
    score: ScoreBoard,
    started: bool,
    outcome: Option<Outcome>,
    awaiting_opponent: bool,
}

impl<R: Rules> SyncEngine<R> {
    pub fn new(room_id: RoomId, local_color: Color, rules: R) -> Self {
        let position = rules.fen();
        Self {
            room_id,
            local_color,
            rules,
            position,
            history: Vec::new(),
            last_move: None,
            score: ScoreBoard::default(),
            started: false,
            outcome: None,
            awaiting_opponent: false,
        }
    }

    /// Adopts the authoritative starting position and opens the game
    /// for moves. Anything assumed locally before this point is
    /// discarded.
    pub fn start(&mut self, fen: &str) -> Result<(), SyncError> {
        self.rules.load(fen)?;
        self.position = fen.to_owned();
        self.history.clear();
        self.last_move = None;
        self.score = ScoreBoard::from_fen(fen)?;
        self.started = true;
        self.awaiting_opponent = self.rules.side_to_move() != self.local_color;
        tracing::info!(room_id = %self.room_id, color = %self.local_color, "engine started");
        Ok(())
    }

    /// Validates and applies a locally initiated move, returning the
    /// frame to transmit.
    ///
    /// A rejection leaves every piece of state untouched and sends
    /// nothing. When the player did not choose a promotion piece, queen
    /// is assumed.
    pub fn submit(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<ClientEvent, MoveRejection> {
        if self.outcome.is_some() {
            return Err(MoveRejection::GameFinished);
        }
        if !self.started {
            return Err(MoveRejection::NotStarted);
        }
        if self.rules.side_to_move() != self.local_color {
            tracing::debug!(room_id = %self.room_id, "move rejected, not our turn");
            return Err(MoveRejection::NotYourTurn);
        }

        let proposed = ProposedMove {
            from: from.clone(),
            to: to.clone(),
            promotion: Some(promotion.unwrap_or(PieceKind::Queen)),
        };
        let applied = self
            .rules
            .try_apply(&proposed)
            .ok_or(MoveRejection::IllegalMove)?;

        let token = MoveToken::new(&from, &to);
        tracing::info!(room_id = %self.room_id, mv = %token, "local move applied");

        self.position = self.rules.fen();
        self.score
            .apply_move(self.local_color, &from, &to, applied.captured, proposed.promotion);
        self.record_move(token.clone(), from, to);
        self.awaiting_opponent = true;
        self.check_terminal();

        Ok(ClientEvent::Move {
            room_id: self.room_id.clone(),
            token,
            color: self.local_color,
        })
    }

    /// Reconciles an authoritative `move_made` broadcast.
    ///
    /// The broadcast's `turn` field names the side to move after the
    /// move. When that is not the local color, the broadcast is the echo
    /// of our own move and is dropped rather than applied twice.
    /// Otherwise the move is replayed through the rules; if the replay
    /// fails the local position has diverged, and the broadcast's
    /// canonical FEN replaces it outright.
    pub fn apply_remote(&mut self, ev: &MoveMade) -> RemoteUpdate {
        if !self.started || self.outcome.is_some() {
            return RemoteUpdate::Ignored;
        }
        if ev.turn != self.local_color {
            tracing::debug!(room_id = %self.room_id, mv = %ev.token, "echo dropped");
            return RemoteUpdate::Echo;
        }

        self.awaiting_opponent = false;
        let proposed = ProposedMove {
            from: ev.from.clone(),
            to: ev.to.clone(),
            promotion: Some(ev.token.promotion_hint().unwrap_or(PieceKind::Queen)),
        };

        let resynced = match self.rules.try_apply(&proposed) {
            Some(applied) => {
                self.score.apply_move(
                    self.local_color.opponent(),
                    &ev.from,
                    &ev.to,
                    applied.captured,
                    proposed.promotion,
                );
                false
            }
            None => {
                tracing::warn!(
                    room_id = %self.room_id,
                    mv = %ev.token,
                    "replay failed, resyncing to canonical position"
                );
                if let Err(err) = self.rules.load(&ev.fen) {
                    tracing::error!(room_id = %self.room_id, %err, "canonical position rejected");
                }
                // Per-piece attribution is lost; reseed the board and
                // recover the totals from the position.
                match ScoreBoard::from_fen(&ev.fen) {
                    Ok(score) => self.score = score,
                    Err(err) => {
                        tracing::warn!(room_id = %self.room_id, %err, "scoreboard reseed failed");
                    }
                }
                true
            }
        };

        self.position = ev.fen.clone();
        self.record_move(ev.token.clone(), ev.from.clone(), ev.to.clone());
        self.check_terminal();

        RemoteUpdate::Applied {
            your_turn: self.your_turn(),
            resynced,
            ended: self.outcome,
        }
    }

    /// Applies a terminal `game_over` broadcast and attributes the
    /// result to the local player.
    pub fn apply_game_over(&mut self, ev: &GameOver) -> Outcome {
        let outcome = match ev.winner {
            Some(winner) if winner == self.local_color => Outcome::Win,
            Some(_) => Outcome::Loss,
            None => Outcome::Draw,
        };
        tracing::info!(
            room_id = %self.room_id,
            result = ?ev.result,
            %outcome,
            "game over"
        );
        self.outcome = Some(outcome);
        outcome
    }

    /// Forced termination on opponent departure. Distinct from a
    /// `game_over` result: nobody wins.
    pub fn opponent_left(&mut self) {
        if self.outcome.is_none() {
            tracing::info!(room_id = %self.room_id, "game abandoned by opponent");
            self.outcome = Some(Outcome::Abandoned);
        }
    }

    pub fn local_color(&self) -> Color {
        self.local_color
    }

    pub fn fen(&self) -> &str {
        &self.position
    }

    pub fn history(&self) -> &[MoveToken] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&(Square, Square)> {
        self.last_move.as_ref()
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn awaiting_opponent(&self) -> bool {
        self.awaiting_opponent
    }

    /// `true` when the game is live and the side to move is ours.
    pub fn your_turn(&self) -> bool {
        self.started && self.outcome.is_none() && self.rules.side_to_move() == self.local_color
    }

    fn record_move(&mut self, token: MoveToken, from: Square, to: Square) {
        self.history.push(token);
        self.last_move = Some((from, to));
    }

    fn check_terminal(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        match self.rules.status() {
            PositionStatus::Ongoing => {}
            PositionStatus::Checkmate => {
                // The side to move is the side that is mated.
                let outcome = if self.rules.side_to_move() == self.local_color {
                    Outcome::Loss
                } else {
                    Outcome::Win
                };
                tracing::info!(room_id = %self.room_id, %outcome, "checkmate on board");
                self.outcome = Some(outcome);
            }
            PositionStatus::Stalemate => {
                tracing::info!(room_id = %self.room_id, "stalemate on board");
                self.outcome = Some(Outcome::Draw);
            }
        }
    }
}
