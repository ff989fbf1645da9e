//! Channel session layer for Matchwire.
//!
//! Owns the single persistent connection to the room server and exposes
//! it as typed events:
//!
//! - [`Connection`]: the dial-side transport seam (send/recv/close).
//! - [`WebSocketChannel`]: the real implementation over
//!   `tokio-tungstenite` (behind the default `websocket` feature).
//! - [`memory::MemoryConnection`]: an in-process loopback pair used by
//!   tests and protocol-level simulations.
//! - [`ChannelSession`]: connect-once semantics, fire-and-forget emit,
//!   and synthesis of a `disconnect` event when the wire goes away.
//! - [`EventBus`]: per-event handler lists dispatched in registration
//!   order.
//!
//! The session never reconnects and never buffers: a send while
//! disconnected is dropped with a log line, matching the fire-and-forget
//! contract of the wire protocol.

#![allow(async_fn_in_trait)]

mod bus;
mod error;
pub mod memory;
mod session;
#[cfg(feature = "websocket")]
mod websocket;

pub use bus::EventBus;
pub use error::ChannelError;
pub use session::{ChannelConfig, ChannelSession};
#[cfg(feature = "websocket")]
pub use websocket::WebSocketChannel;

/// A single client-side connection that can send and receive frames.
pub trait Connection: Send + Sync + 'static {
    /// Sends one frame to the server.
    async fn send(&self, data: &[u8]) -> Result<(), ChannelError>;

    /// Receives the next frame.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv(&self) -> Result<Option<Vec<u8>>, ChannelError>;

    /// Closes the connection.
    async fn close(&self) -> Result<(), ChannelError>;
}
