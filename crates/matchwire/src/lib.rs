//! # Matchwire
//!
//! Client-side synchronization core for two-player, turn-based board
//! games played over a persistent bidirectional channel, with the
//! server as the single source of truth.
//!
//! The client covers room lifecycle (create, join, color assignment,
//! start condition), turn authority, optimistic move application with
//! authoritative reconciliation, termination detection, and a chat
//! relay multiplexed over the same connection. Rendering is the
//! embedder's job: everything user-visible surfaces as a
//! [`Status`](client::Status) value.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use matchwire::prelude::*;
//!
//! # async fn run(creator: impl RoomCreator) -> Result<(), MatchwireError> {
//! let mut client: GameClient<WebSocketChannel> = GameClient::new(ClientConfig::default());
//! let _created = client.create_room(&creator, "normal").await?;
//! client
//!     .connect(|| WebSocketChannel::connect("ws://localhost:8080/ws"))
//!     .await?;
//!
//! while let Some(statuses) = client.next_statuses().await {
//!     for status in statuses {
//!         println!("{status:?}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{ClientConfig, GameClient, Status};
pub use error::MatchwireError;

pub mod prelude {
    pub use crate::{ClientConfig, GameClient, MatchwireError, Status};

    pub use matchwire_channel::{
        ChannelConfig, ChannelError, Connection, EventBus, WebSocketChannel,
    };
    pub use matchwire_chat::{ChatRelay, MessageOrigin, RenderedMessage, escape_html};
    pub use matchwire_protocol::{
        ClientEvent, Color, EventKind, MoveToken, PieceKind, RoomId, ServerEvent, Square,
    };
    pub use matchwire_room::{
        CreatedRoom, RoomController, RoomCreator, RoomError, RoomPhase, TerminationCause,
    };
    pub use matchwire_sync::{
        ChessRules, MoveRejection, Outcome, PieceStanding, Rules, ScoreBoard, SyncEngine,
    };
}
