//! Room lifecycle management for the Matchwire client.
//!
//! A room is the server-managed pairing context for exactly two players.
//! This crate tracks the client-local view of one room: its phase
//! machine, the two color slots, the local player's fixed color, and the
//! terminal cause once the room is over.
//!
//! # Key types
//!
//! - [`RoomController`]: the client-local room state and its event
//!   handlers
//! - [`RoomPhase`]: forward-only lifecycle state machine
//! - [`RoomCreator`]: collaborator trait for the out-of-band
//!   create-room request
//! - [`resolve_local_color`]: the pure predicate behind reactive color
//!   assignment

#![allow(async_fn_in_trait)]

mod create;
mod error;
mod phase;
mod room;

pub use create::{CreatedRoom, RoomCreator, auto_name, parse_room_path};
pub use error::RoomError;
pub use phase::RoomPhase;
pub use room::{
    Departure, JoinUpdate, PlayerSlot, RoomController, TerminationCause,
    resolve_local_color,
};
