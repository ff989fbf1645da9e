//! Room chat for the Matchwire client.
//!
//! Chat shares the channel with game traffic but touches none of the
//! game state. Outbound messages are fire-and-forget and never locally
//! echoed; the sender's own line arrives through the same broadcast
//! every participant receives, which keeps one consistent message order
//! per room. Inbound text is attacker-controllable and is HTML-escaped
//! before it can reach a transcript.

mod escape;
mod relay;

pub use escape::escape_html;
pub use relay::{ChatRelay, MessageOrigin, RenderedMessage};
