//! The client-local room: two color slots, a fixed local color, and the
//! event handlers that keep them consistent with server broadcasts.

use matchwire_protocol::{Color, GameStart, PlayerEntry, PlayerJoined, PlayerLeft, RoomId};

use crate::RoomPhase;

/// One occupied color slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSlot {
    pub name: String,
    pub online: bool,
}

/// Why a room reached [`RoomPhase::Terminated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationCause {
    /// The opponent departed mid-game. No winner is declared.
    OpponentLeft { name: String },
    /// The server reported a game result.
    Finished { description: String },
}

impl std::fmt::Display for TerminationCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpponentLeft { name } => write!(f, "{name} left the game"),
            Self::Finished { description } => f.write_str(description),
        }
    }
}

/// Snapshot returned by [`RoomController::handle_player_joined`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinUpdate {
    pub occupancy: u8,
    pub local_color: Option<Color>,
    pub opponent_name: Option<String>,
}

/// Result of [`RoomController::handle_player_left`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub name: String,
    pub color: Color,
    /// `true` when the departure terminated a started game.
    pub terminated: bool,
}

/// Decides the local color from the current assignment and a roster.
///
/// The creator's color is fixed to white at creation time and never
/// revisited. A join-by-link client starts with no color and adopts
/// black the moment a roster shows white already claimed, which can only
/// be the creator. Once assigned, a color is never changed.
pub fn resolve_local_color(current: Option<Color>, roster: &[PlayerEntry]) -> Option<Color> {
    if current.is_some() {
        return current;
    }
    roster
        .iter()
        .any(|p| p.color == Color::White)
        .then_some(Color::Black)
}

/// The client-local view of one room.
///
/// Constructed on room entry (create or join link), torn down implicitly
/// when the page navigates away. All mutation happens through the
/// `handle_*` methods, driven by server broadcasts.
#[derive(Debug)]
pub struct RoomController {
    id: RoomId,
    variant: String,
    white: Option<PlayerSlot>,
    black: Option<PlayerSlot>,
    phase: RoomPhase,
    local_color: Option<Color>,
    local_name: String,
    cause: Option<TerminationCause>,
}

impl RoomController {
    /// Context for the client that issued the create request. The
    /// creator is always white.
    pub fn for_created(id: RoomId, variant: impl Into<String>, local_name: impl Into<String>) -> Self {
        let local_name = local_name.into();
        Self {
            id,
            variant: variant.into(),
            white: Some(PlayerSlot {
                name: local_name.clone(),
                online: true,
            }),
            black: None,
            phase: RoomPhase::Connecting,
            local_color: Some(Color::White),
            local_name,
            cause: None,
        }
    }

    /// Context for a client arriving through a join link. The local
    /// color is unknown until the first `player_joined` broadcast.
    pub fn for_join_link(id: RoomId, local_name: impl Into<String>) -> Self {
        Self {
            id,
            variant: String::new(),
            white: None,
            black: None,
            phase: RoomPhase::Connecting,
            local_color: None,
            local_name: local_name.into(),
            cause: None,
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn local_color(&self) -> Option<Color> {
        self.local_color
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn player(&self, color: Color) -> Option<&PlayerSlot> {
        match color {
            Color::White => self.white.as_ref(),
            Color::Black => self.black.as_ref(),
        }
    }

    pub fn occupancy(&self) -> u8 {
        u8::from(self.white.is_some()) + u8::from(self.black.is_some())
    }

    /// The outward terminal signal: a single flag plus a cause.
    pub fn game_over(&self) -> bool {
        self.phase.is_terminated()
    }

    pub fn cause(&self) -> Option<&TerminationCause> {
        self.cause.as_ref()
    }

    /// Applies a `player_joined` broadcast.
    ///
    /// Idempotent: re-delivery with the same roster changes neither
    /// occupancy nor the fixed local color. A slot that is already
    /// filled is never reassigned.
    pub fn handle_player_joined(&mut self, ev: &PlayerJoined) -> JoinUpdate {
        if !self.phase.is_terminated() {
            if let Some(color) = resolve_local_color(self.local_color, &ev.players) {
                if self.local_color.is_none() {
                    tracing::info!(room_id = %self.id, %color, "local color fixed");
                }
                self.local_color = Some(color);
            }

            for entry in &ev.players {
                self.fill_slot(entry);
            }

            if self.phase.can_advance_to(RoomPhase::Joined) {
                self.phase = RoomPhase::Joined;
            }
            tracing::info!(
                room_id = %self.id,
                players = self.occupancy(),
                "player joined"
            );
        }

        JoinUpdate {
            occupancy: self.occupancy(),
            local_color: self.local_color,
            opponent_name: self.opponent_name(),
        }
    }

    /// Applies a `game_start` broadcast.
    ///
    /// Returns `true` on the one valid `Joined → Started` transition;
    /// re-delivery and out-of-phase starts are ignored. The broadcast's
    /// variant tag overwrites whatever was assumed locally.
    pub fn handle_game_start(&mut self, ev: &GameStart) -> bool {
        if self.phase != RoomPhase::Joined {
            tracing::warn!(
                room_id = %self.id,
                phase = %self.phase,
                "ignoring game_start out of phase"
            );
            return false;
        }
        self.variant = ev.variant_state.clone();
        self.phase = RoomPhase::Started;
        tracing::info!(room_id = %self.id, variant = %self.variant, "game started");
        true
    }

    /// Applies a `player_left` broadcast.
    ///
    /// The departed slot is marked offline (the name is retained). While
    /// started, an opponent departure is an immediate terminal
    /// condition, not a pause; before the start it only updates the
    /// roster display.
    pub fn handle_player_left(&mut self, ev: &PlayerLeft) -> Departure {
        if let Some(slot) = self.slot_mut(ev.color) {
            slot.online = false;
        }

        let terminated = if self.phase.is_started() {
            self.terminate(TerminationCause::OpponentLeft {
                name: ev.name.clone(),
            });
            true
        } else {
            false
        };

        Departure {
            name: ev.name.clone(),
            color: ev.color,
            terminated,
        }
    }

    /// Moves the room to `Terminated` with the given cause. The first
    /// cause wins; a terminated room never changes again.
    pub fn terminate(&mut self, cause: TerminationCause) {
        if self.phase.is_terminated() {
            return;
        }
        self.phase = RoomPhase::Terminated;
        tracing::info!(room_id = %self.id, cause = %cause, "room terminated");
        self.cause = Some(cause);
    }

    fn opponent_name(&self) -> Option<String> {
        let color = self.local_color?;
        self.player(color.opponent()).map(|slot| slot.name.clone())
    }

    fn slot_mut(&mut self, color: Color) -> Option<&mut PlayerSlot> {
        match color {
            Color::White => self.white.as_mut(),
            Color::Black => self.black.as_mut(),
        }
    }

    fn fill_slot(&mut self, entry: &PlayerEntry) {
        let slot = match entry.color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        match slot {
            None => {
                *slot = Some(PlayerSlot {
                    name: entry.name.clone(),
                    online: true,
                });
            }
            Some(existing) if existing.name == entry.name => {
                existing.online = true;
            }
            Some(_) => {
                // Occupied by someone else: the slot is fixed for the
                // life of the room.
                tracing::warn!(
                    room_id = %self.id,
                    color = %entry.color,
                    "ignoring join for an already-filled color"
                );
            }
        }
    }
}
