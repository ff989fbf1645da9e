//! Wire protocol for Matchwire.
//!
//! This crate defines the "language" spoken between the game client and
//! the room server:
//!
//! - **Primitives** ([`Color`], [`Square`], [`MoveToken`], [`PieceKind`],
//!   [`RoomId`]): the domain vocabulary shared by every layer.
//! - **Events** ([`ServerEvent`], [`ClientEvent`]): the messages that
//!   travel on the wire, one JSON frame per event.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how events are turned
//!   into bytes and back.
//! - **Errors** ([`ProtocolError`]): what can go wrong doing so.
//!
//! The protocol layer knows nothing about connections, rooms, or turn
//! order. It only describes shapes on the wire.

mod codec;
mod error;
mod event;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use event::{
    ChatBroadcast, ClientEvent, ErrorNotice, EventKind, GameOver, GameStart,
    MoveMade, PlayerEntry, PlayerJoined, PlayerLeft, ResultKind, ServerEvent,
};
pub use types::{Color, MoveToken, PieceKind, RoomId, Square};
