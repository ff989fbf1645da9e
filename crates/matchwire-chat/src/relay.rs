//! Outbound composition and inbound rendering of chat lines.

use matchwire_protocol::{ChatBroadcast, ClientEvent, Color, RoomId};

use crate::escape_html;

/// Whether a rendered line came from the local player or the opponent.
///
/// Decided by comparing colors, not names or session identity: names
/// are not unique, colors are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    Own,
    Peer,
}

/// A chat line ready for the transcript. `text` is already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub sender: String,
    pub color: Color,
    pub origin: MessageOrigin,
    pub text: String,
}

/// Chat endpoint for one room.
///
/// Unbound until the room is known; composing without a room is a
/// silent no-op, matching the fire-and-forget contract of the channel.
#[derive(Debug, Default)]
pub struct ChatRelay {
    room_id: Option<RoomId>,
    local_color: Option<Color>,
}

impl ChatRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_room(&mut self, room_id: RoomId) {
        self.room_id = Some(room_id);
    }

    pub fn set_local_color(&mut self, color: Color) {
        self.local_color = Some(color);
    }

    /// Builds the outbound frame for a message, or `None` when there is
    /// nothing to send: blank input, or no room bound yet.
    ///
    /// There is no local echo. The sender's line comes back through the
    /// room broadcast like everyone else's.
    pub fn compose(&self, text: &str) -> Option<ClientEvent> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let Some(room_id) = &self.room_id else {
            tracing::debug!("chat message dropped, no room bound");
            return None;
        };
        Some(ClientEvent::ChatMessage {
            room_id: room_id.clone(),
            message: text.to_owned(),
        })
    }

    /// Renders an inbound broadcast: attributes it by color and escapes
    /// the text.
    pub fn render(&self, ev: &ChatBroadcast) -> RenderedMessage {
        let origin = if self.local_color == Some(ev.color) {
            MessageOrigin::Own
        } else {
            MessageOrigin::Peer
        };
        RenderedMessage {
            sender: ev.sender.clone(),
            color: ev.color,
            origin,
            text: escape_html(&ev.message),
        }
    }
}
