//! Room creation and join-link entry.
//!
//! Creation happens outside the persistent channel, as a one-shot
//! request against the room server. The [`RoomCreator`] trait is the
//! seam: the real implementation lives with whatever HTTP client the
//! application carries, and tests script it directly.

use matchwire_protocol::RoomId;
use rand::Rng;

use crate::RoomError;

/// A freshly created room as returned by the room server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoom {
    pub room_id: RoomId,
    /// Shareable link the second player uses to join.
    pub join_url: String,
}

/// One-shot room creation against the server.
pub trait RoomCreator: Send + Sync {
    /// Creates a room configured with the given variant tag.
    ///
    /// There is no retry at this level; the caller decides how a
    /// failure is surfaced.
    async fn create_room(&self, variant: &str) -> Result<CreatedRoom, RoomError>;
}

/// Extracts the room id from a navigation path of the form
/// `/room/{id}`, where the id is non-empty and alphanumeric.
pub fn parse_room_path(path: &str) -> Option<RoomId> {
    let id = path.strip_prefix("/room/")?;
    let id = id.strip_suffix('/').unwrap_or(id);
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(RoomId::new(id))
}

/// Generates a throwaway display name for players who never typed one.
pub fn auto_name() -> String {
    let n: u16 = rand::rng().random_range(0..10000);
    format!("Player_{n:04}")
}
