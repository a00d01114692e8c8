use crate::session::ConnectionRegistry;
use parley_core::{ConnectionId, RoomId, ServerEvent};
use tracing::debug;

/// Fans presence events out to an audience decided by the caller.
///
/// The broadcaster holds no membership state of its own: the session manager
/// hands it the pre-join or post-leave snapshot it captured under the room's
/// exclusion scope, which keeps "who is a member" and "who gets notified"
/// from drifting apart.
#[derive(Clone)]
pub struct PresenceBroadcaster {
    registry: ConnectionRegistry,
}

impl PresenceBroadcaster {
    pub fn new(registry: ConnectionRegistry) -> Self {
        Self { registry }
    }

    /// Tells every connection in `audience` that `joined` entered the room.
    /// The joiner itself is not in the audience; it learns about the room
    /// from its join reply instead.
    pub fn announce_join(
        &self,
        room: &RoomId,
        joined: ConnectionId,
        display_name: &str,
        audience: &[ConnectionId],
    ) {
        let mut delivered = 0;
        for member in audience {
            if *member == joined {
                continue;
            }
            let event = ServerEvent::UserJoined {
                connection_id: joined,
                display_name: display_name.to_string(),
            };
            if self.registry.send_to(member, event) {
                delivered += 1;
            }
        }
        debug!(room = %room, connection = %joined, delivered, "announced join");
    }

    /// Tells every connection in `audience` that `left` is gone. Used for
    /// explicit leaves and abrupt disconnects alike.
    pub fn announce_leave(&self, room: &RoomId, left: ConnectionId, audience: &[ConnectionId]) {
        let mut delivered = 0;
        for member in audience {
            if *member == left {
                continue;
            }
            let event = ServerEvent::UserLeft {
                connection_id: left,
            };
            if self.registry.send_to(member, event) {
                delivered += 1;
            }
        }
        debug!(room = %room, connection = %left, delivered, "announced leave");
    }
}
