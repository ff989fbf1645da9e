//! The game client: one room, one channel, one game.
//!
//! `GameClient` ties the layers together the way a page would: the room
//! controller owns membership and lifecycle, the sync engine owns
//! turn-taking once the game starts, and the chat relay rides the same
//! channel without touching game state. Server events flow through an
//! [`EventBus`] so embedders can subscribe alongside the built-in
//! handlers; everything user-visible comes out as [`Status`] values
//! rather than direct UI calls.

use std::time::Duration;

use matchwire_channel::{ChannelConfig, ChannelError, ChannelSession, Connection, EventBus};
use matchwire_chat::{ChatRelay, RenderedMessage};
use matchwire_protocol::{ClientEvent, Color, EventKind, PieceKind, ServerEvent, Square};
use matchwire_room::{
    CreatedRoom, RoomController, RoomCreator, RoomError, TerminationCause, auto_name,
    parse_room_path,
};
use matchwire_sync::{ChessRules, MoveRejection, Outcome, RemoteUpdate, Rules, SyncEngine};

use crate::MatchwireError;

/// Tunables for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub channel: ChannelConfig,
    /// Bound on the out-of-band create-room request, so an unresponsive
    /// server cannot leave the flow pending forever.
    pub create_timeout: Duration,
    /// Display name. Auto-generated when absent.
    pub local_name: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            channel: ChannelConfig::default(),
            create_timeout: Duration::from_secs(10),
            local_name: None,
        }
    }
}

/// A user-visible state change. The embedder renders these however it
/// likes; the client never touches a UI directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    PlayerJoined { count: u8, name: String },
    ColorAssigned(Color),
    GameStarted,
    YourTurn,
    WaitingForOpponent,
    MoveRejected(MoveRejection),
    /// The board diverged and was reloaded from the canonical position.
    Resynced,
    GameOver(Outcome),
    /// A player went offline before the game started.
    PlayerOffline { name: String },
    /// The opponent departed mid-game; the game is over with no winner.
    OpponentLeft { name: String },
    Chat(RenderedMessage),
    ServerError(String),
    /// The channel is gone. Nothing is buffered or retried; the page
    /// needs a reload.
    ConnectionLost,
}

/// Mutable client state shared by the event handlers.
struct GameState<R: Rules> {
    room: Option<RoomController>,
    engine: Option<SyncEngine<R>>,
    chat: ChatRelay,
    statuses: Vec<Status>,
}

/// Client endpoint for one game of Matchwire.
pub struct GameClient<C: Connection, R: Rules + Default = ChessRules> {
    session: ChannelSession<C>,
    bus: EventBus<GameState<R>>,
    state: GameState<R>,
    local_name: String,
    create_timeout: Duration,
}

impl<C: Connection, R: Rules + Default + 'static> GameClient<C, R> {
    pub fn new(config: ClientConfig) -> Self {
        let local_name = config.local_name.unwrap_or_else(auto_name);
        let mut bus = EventBus::new();
        register_handlers(&mut bus);
        Self {
            session: ChannelSession::new(config.channel),
            bus,
            state: GameState {
                room: None,
                engine: None,
                chat: ChatRelay::new(),
                statuses: Vec::new(),
            },
            local_name,
            create_timeout: config.create_timeout,
        }
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn room(&self) -> Option<&RoomController> {
        self.state.room.as_ref()
    }

    pub fn engine(&self) -> Option<&SyncEngine<R>> {
        self.state.engine.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Subscribes an additional handler next to the built-in ones.
    /// Handlers for one kind run in registration order.
    pub fn on<F>(&mut self, kind: EventKind, mut handler: F)
    where
        F: FnMut(&ServerEvent) + Send + 'static,
    {
        self.bus.on(kind, move |_, event| handler(event));
    }

    /// Creates a room through the out-of-band collaborator and takes the
    /// creator's seat: white, unconditionally.
    pub async fn create_room(
        &mut self,
        creator: &impl RoomCreator,
        variant: &str,
    ) -> Result<CreatedRoom, MatchwireError> {
        let created = tokio::time::timeout(self.create_timeout, creator.create_room(variant))
            .await
            .map_err(|_| RoomError::CreateTimedOut(self.create_timeout))??;

        tracing::info!(room_id = %created.room_id, "room created");
        self.state.chat.bind_room(created.room_id.clone());
        self.state.chat.set_local_color(Color::White);
        self.state.room = Some(RoomController::for_created(
            created.room_id.clone(),
            variant,
            self.local_name.clone(),
        ));
        Ok(created)
    }

    /// Adopts the room id embedded in a navigation path, if any. The
    /// local color stays open until the roster arrives.
    pub fn attach_path(&mut self, path: &str) -> bool {
        if self.state.room.is_some() {
            return false;
        }
        let Some(room_id) = parse_room_path(path) else {
            return false;
        };
        tracing::info!(%room_id, "joining via link");
        self.state.chat.bind_room(room_id.clone());
        self.state.room = Some(RoomController::for_join_link(
            room_id,
            self.local_name.clone(),
        ));
        true
    }

    /// Connects the channel (at most once) and, on a fresh connect,
    /// joins the current room.
    pub async fn connect<F, Fut>(&mut self, dial: F) -> Result<(), MatchwireError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, ChannelError>>,
    {
        let fresh = self.session.connect_once(dial).await?;
        if fresh {
            if let Some(room) = &self.state.room {
                let join = ClientEvent::Join {
                    room_id: room.id().clone(),
                    name: self.local_name.clone(),
                };
                self.session.emit(&join).await;
            }
        }
        Ok(())
    }

    /// Waits for the next server event and runs it through the
    /// handlers. Returns `None` once the channel has ended (after the
    /// synthesized disconnect has been delivered).
    pub async fn next_statuses(&mut self) -> Option<Vec<Status>> {
        let event = self.session.next_event().await?;
        Some(self.apply(&event))
    }

    /// Dispatches one event and drains the statuses it produced.
    pub fn apply(&mut self, event: &ServerEvent) -> Vec<Status> {
        self.bus.dispatch(&mut self.state, event);
        std::mem::take(&mut self.state.statuses)
    }

    /// Submits a locally initiated move. Rejections are local only; a
    /// rejected move sends nothing.
    pub async fn submit_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Vec<Status> {
        let Some(engine) = self.state.engine.as_mut() else {
            return vec![Status::MoveRejected(MoveRejection::NotStarted)];
        };
        match engine.submit(from, to, promotion) {
            Ok(frame) => {
                self.session.emit(&frame).await;
                vec![Status::WaitingForOpponent]
            }
            Err(rejection) => vec![Status::MoveRejected(rejection)],
        }
    }

    /// Sends a chat line. Blank input, or no room yet, is a no-op. The
    /// sender's own line comes back through the room broadcast.
    pub async fn send_chat(&mut self, text: &str) {
        if let Some(frame) = self.state.chat.compose(text) {
            self.session.emit(&frame).await;
        }
    }
}

fn register_handlers<R: Rules + Default + 'static>(bus: &mut EventBus<GameState<R>>) {
    bus.on(EventKind::PlayerJoined, |state, event| {
        let ServerEvent::PlayerJoined(ev) = event else {
            return;
        };
        let Some(room) = state.room.as_mut() else {
            return;
        };
        let had_color = room.local_color();
        let update = room.handle_player_joined(ev);
        state.statuses.push(Status::PlayerJoined {
            count: update.occupancy,
            name: ev.name.clone(),
        });
        if had_color.is_none() {
            if let Some(color) = update.local_color {
                state.chat.set_local_color(color);
                state.statuses.push(Status::ColorAssigned(color));
            }
        }
    });

    bus.on(EventKind::GameStart, |state, event| {
        let ServerEvent::GameStart(ev) = event else {
            return;
        };
        let Some(room) = state.room.as_mut() else {
            return;
        };
        if !room.handle_game_start(ev) {
            return;
        }
        let Some(color) = room.local_color() else {
            tracing::warn!(room_id = %room.id(), "game started without a color assignment");
            return;
        };

        let mut engine = SyncEngine::new(room.id().clone(), color, R::default());
        if let Err(err) = engine.start(&ev.fen) {
            tracing::error!(room_id = %room.id(), %err, "starting position rejected");
            return;
        }
        let your_turn = engine.your_turn();
        state.engine = Some(engine);
        state.statuses.push(Status::GameStarted);
        state.statuses.push(if your_turn {
            Status::YourTurn
        } else {
            Status::WaitingForOpponent
        });
    });

    bus.on(EventKind::MoveMade, |state, event| {
        let ServerEvent::MoveMade(ev) = event else {
            return;
        };
        let Some(engine) = state.engine.as_mut() else {
            return;
        };
        match engine.apply_remote(ev) {
            RemoteUpdate::Echo | RemoteUpdate::Ignored => {}
            RemoteUpdate::Applied {
                your_turn,
                resynced,
                ended,
            } => {
                if resynced {
                    state.statuses.push(Status::Resynced);
                }
                if let Some(outcome) = ended {
                    if let Some(room) = state.room.as_mut() {
                        room.terminate(TerminationCause::Finished {
                            description: outcome.to_string(),
                        });
                    }
                    state.statuses.push(Status::GameOver(outcome));
                } else if your_turn {
                    state.statuses.push(Status::YourTurn);
                }
            }
        }
    });

    bus.on(EventKind::GameOver, |state, event| {
        let ServerEvent::GameOver(ev) = event else {
            return;
        };
        let Some(engine) = state.engine.as_mut() else {
            return;
        };
        let outcome = engine.apply_game_over(ev);
        if let Some(room) = state.room.as_mut() {
            room.terminate(TerminationCause::Finished {
                description: outcome.to_string(),
            });
        }
        state.statuses.push(Status::GameOver(outcome));
    });

    bus.on(EventKind::PlayerLeft, |state, event| {
        let ServerEvent::PlayerLeft(ev) = event else {
            return;
        };
        let Some(room) = state.room.as_mut() else {
            return;
        };
        let departure = room.handle_player_left(ev);
        if departure.terminated {
            if let Some(engine) = state.engine.as_mut() {
                engine.opponent_left();
            }
            state.statuses.push(Status::OpponentLeft {
                name: departure.name,
            });
        } else {
            state.statuses.push(Status::PlayerOffline {
                name: departure.name,
            });
        }
    });

    bus.on(EventKind::ChatMessage, |state, event| {
        let ServerEvent::ChatMessage(ev) = event else {
            return;
        };
        state.statuses.push(Status::Chat(state.chat.render(ev)));
    });

    bus.on(EventKind::Error, |state, event| {
        let ServerEvent::Error(ev) = event else {
            return;
        };
        tracing::warn!(message = %ev.message, "server reported an error");
        state.statuses.push(Status::ServerError(ev.message.clone()));
    });

    bus.on(EventKind::Disconnect, |state, _| {
        state.statuses.push(Status::ConnectionLost);
    });
}
