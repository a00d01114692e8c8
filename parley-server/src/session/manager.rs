use crate::config::ServerConfig;
use crate::error::SignalingError;
use crate::room::{LeaveOutcome, RoomDirectory};
use crate::session::ConnectionRegistry;
use crate::signaling::{MessageRouter, PresenceBroadcaster};
use parley_core::{ConnectionId, MemberInfo, RoomId, ServerEvent, Signal};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Orchestrates the per-connection lifecycle: register on transport open,
/// join/leave on request, full cleanup on transport close. Keeps the registry
/// and the room directory in step and triggers presence and relay as side
/// effects; it owns the only write paths into both structures.
///
/// Cloning is cheap and shares all state, one clone per connection task.
#[derive(Clone)]
pub struct SessionManager {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
    presence: PresenceBroadcaster,
    router: MessageRouter,
}

impl SessionManager {
    pub fn new(config: ServerConfig) -> Self {
        let registry = ConnectionRegistry::new(config.send_queue_capacity);
        let directory = RoomDirectory::new();
        let presence = PresenceBroadcaster::new(registry.clone());
        let router = MessageRouter::new(registry.clone(), directory.clone());
        Self {
            registry,
            directory,
            presence,
            router,
        }
    }

    /// Transport opened: mint an id and register the connection. Returns the
    /// id and the receive end of the connection's outbound queue.
    pub fn connect(
        &self,
    ) -> Result<(ConnectionId, mpsc::Receiver<ServerEvent>), SignalingError> {
        let id = ConnectionId::new();
        let rx = self.registry.register(id)?;
        info!(connection = %id, "connected");
        Ok((id, rx))
    }

    /// Join request. On success the caller gets the pre-join member snapshot
    /// (with display names) to hand back to the joiner; everyone who was
    /// already present has been sent `user-joined`.
    pub fn join(
        &self,
        conn: ConnectionId,
        room: RoomId,
        display_name: String,
    ) -> Result<Vec<MemberInfo>, SignalingError> {
        let snapshot = self.directory.join(&room, conn)?;
        self.registry.set_room(&conn, Some(room.clone()));
        self.registry.set_display_name(&conn, display_name.clone());

        self.presence
            .announce_join(&room, conn, &display_name, &snapshot);
        info!(connection = %conn, room = %room, peers = snapshot.len(), "joined call");

        Ok(snapshot
            .into_iter()
            .map(|id| MemberInfo {
                connection_id: id,
                display_name: self.registry.display_name_of(&id).unwrap_or_default(),
            })
            .collect())
    }

    /// Explicit leave. Leaving without being in a room is a protocol error,
    /// unlike the disconnect path which tolerates any state.
    pub fn leave(&self, conn: ConnectionId) -> Result<(), SignalingError> {
        if !self.depart(conn) {
            return Err(SignalingError::NotInRoom);
        }
        Ok(())
    }

    /// Transport closed, gracefully or not. Runs the same departure steps as
    /// an explicit leave, then deregisters. Must never fail and must be safe
    /// to run twice: every step no-ops on missing state.
    pub fn disconnect(&self, conn: ConnectionId) {
        self.depart(conn);
        self.registry.unregister(&conn);
        info!(connection = %conn, "disconnected");
    }

    /// Shared leave/disconnect tail: remove from the current room, clear the
    /// registry assignment, announce to whoever remains. Returns whether the
    /// connection was in a room at all.
    fn depart(&self, conn: ConnectionId) -> bool {
        let Some(room) = self.registry.room_of(&conn) else {
            return false;
        };

        let outcome = self.directory.leave(&room, &conn);
        self.registry.set_room(&conn, None);

        match outcome {
            LeaveOutcome::Remaining(rest) => {
                self.presence.announce_leave(&room, conn, &rest);
            }
            LeaveOutcome::Emptied => {}
            LeaveOutcome::NotAMember => {
                // Registry said in-room but the directory disagreed; the
                // assignment is cleared above, so just record it.
                warn!(connection = %conn, room = %room, "stale room assignment cleared");
            }
        }
        true
    }

    /// Relay a signaling payload. Validation and routing per the router's
    /// rules; errors are local to the sender.
    pub fn relay(&self, signal: Signal) -> Result<(), SignalingError> {
        self.router.relay(signal)
    }

    /// Direct delivery to one connection, used by the transport layer for
    /// replies (`welcome`, `room-joined`, `signaling-error`).
    pub fn send_to(&self, conn: &ConnectionId, event: ServerEvent) -> bool {
        self.registry.send_to(conn, event)
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &RoomDirectory {
        &self.directory
    }
}
