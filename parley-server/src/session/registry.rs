use crate::error::SignalingError;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parley_core::{ConnectionId, RoomId, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

struct ConnectionEntry {
    tx: mpsc::Sender<ServerEvent>,
    room: Option<RoomId>,
    display_name: Option<String>,
}

/// Tracks every live connection: its outbound event queue, the room it
/// currently belongs to, and the display name supplied at join time.
///
/// Thread-safe via Arc + DashMap; cloning shares the inner state. Keeping the
/// directory in step with `set_room` is the session manager's job.
#[derive(Clone)]
pub struct ConnectionRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    connections: DashMap<ConnectionId, ConnectionEntry>,
    send_queue_capacity: usize,
}

impl ConnectionRegistry {
    pub fn new(send_queue_capacity: usize) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                connections: DashMap::new(),
                send_queue_capacity,
            }),
        }
    }

    /// Registers a connection and returns the receive end of its outbound
    /// queue. The transport pump reads from it and writes to the socket.
    pub fn register(
        &self,
        id: ConnectionId,
    ) -> Result<mpsc::Receiver<ServerEvent>, SignalingError> {
        match self.inner.connections.entry(id) {
            Entry::Occupied(_) => Err(SignalingError::DuplicateConnection(id)),
            Entry::Vacant(vacant) => {
                let (tx, rx) = mpsc::channel(self.inner.send_queue_capacity);
                vacant.insert(ConnectionEntry {
                    tx,
                    room: None,
                    display_name: None,
                });
                debug!(connection = %id, "connection registered");
                Ok(rx)
            }
        }
    }

    /// Removes a connection. Unregistering an absent id is a no-op, so
    /// duplicate cleanup signals are harmless.
    pub fn unregister(&self, id: &ConnectionId) {
        if self.inner.connections.remove(id).is_some() {
            debug!(connection = %id, "connection unregistered");
        }
    }

    pub fn room_of(&self, id: &ConnectionId) -> Option<RoomId> {
        self.inner.connections.get(id)?.room.clone()
    }

    pub fn set_room(&self, id: &ConnectionId, room: Option<RoomId>) {
        if let Some(mut entry) = self.inner.connections.get_mut(id) {
            entry.room = room;
        }
    }

    pub fn set_display_name(&self, id: &ConnectionId, display_name: String) {
        if let Some(mut entry) = self.inner.connections.get_mut(id) {
            entry.display_name = Some(display_name);
        }
    }

    pub fn display_name_of(&self, id: &ConnectionId) -> Option<String> {
        self.inner.connections.get(id)?.display_name.clone()
    }

    pub fn is_registered(&self, id: &ConnectionId) -> bool {
        self.inner.connections.contains_key(id)
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    /// Queues an event for delivery to one connection without blocking.
    ///
    /// Returns `false` when the connection is unknown, its queue is full, or
    /// its transport is already closing. The caller decides whether that
    /// matters; a dropped presence event for a half-dead client does not.
    pub fn send_to(&self, id: &ConnectionId, event: ServerEvent) -> bool {
        let Some(entry) = self.inner.connections.get(id) else {
            debug!(connection = %id, "send to unknown connection");
            return false;
        };
        match entry.tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(connection = %id, "outbound queue full, event dropped");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!(connection = %id, "outbound queue closed, transport gone");
                false
            }
        }
    }
}
