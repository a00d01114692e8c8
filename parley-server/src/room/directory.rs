use crate::error::SignalingError;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parley_core::{ConnectionId, RoomId};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of removing a connection from a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The connection left; these members remain, in join order. This is the
    /// audience for the departure announcement, captured inside the same
    /// critical section as the removal.
    Remaining(Vec<ConnectionId>),
    /// The connection left and the room is gone with it.
    Emptied,
    /// The connection was not a member of the named room; nothing changed.
    NotAMember,
}

/// Tracks, per room id, the ordered set of member connections.
///
/// A room exists exactly while it has members: it is created by the first
/// join and deleted the instant the last member leaves, both inside a single
/// entry-level critical section, so two joins racing on a fresh room id can
/// never create it twice. Operations on different rooms do not contend.
#[derive(Clone)]
pub struct RoomDirectory {
    inner: Arc<DirectoryInner>,
}

struct DirectoryInner {
    rooms: DashMap<RoomId, Vec<ConnectionId>>,
    /// Reverse index: which room a connection is in. Backs the
    /// one-room-per-connection rule without scanning every room.
    members: DashMap<ConnectionId, RoomId>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DirectoryInner {
                rooms: DashMap::new(),
                members: DashMap::new(),
            }),
        }
    }

    /// Adds `conn` to `room`, creating the room if this is the first join,
    /// and returns the membership as it was before the join. That snapshot is
    /// exactly the set of peers the new member must initiate call setup with.
    ///
    /// Fails with `AlreadyInRoom` if the connection is a member of any room;
    /// there is no implicit room switching.
    pub fn join(
        &self,
        room: &RoomId,
        conn: ConnectionId,
    ) -> Result<Vec<ConnectionId>, SignalingError> {
        if let Some(current) = self.inner.members.get(&conn).map(|r| r.value().clone()) {
            return Err(SignalingError::AlreadyInRoom(current));
        }

        let snapshot = {
            let mut members = self.inner.rooms.entry(room.clone()).or_default();
            if members.is_empty() {
                info!(room = %room, "room created");
            }
            let snapshot = members.clone();
            members.push(conn);
            snapshot
        };
        self.inner.members.insert(conn, room.clone());

        debug!(room = %room, connection = %conn, peers = snapshot.len(), "joined room");
        Ok(snapshot)
    }

    /// Removes `conn` from `room`. Removing a connection that is not a member
    /// is a no-op, which makes duplicate disconnect signals harmless.
    pub fn leave(&self, room: &RoomId, conn: &ConnectionId) -> LeaveOutcome {
        let outcome = match self.inner.rooms.entry(room.clone()) {
            Entry::Occupied(mut occupied) => {
                let members = occupied.get_mut();
                let before = members.len();
                members.retain(|m| m != conn);
                if members.len() == before {
                    LeaveOutcome::NotAMember
                } else if members.is_empty() {
                    occupied.remove();
                    info!(room = %room, "room emptied and removed");
                    LeaveOutcome::Emptied
                } else {
                    LeaveOutcome::Remaining(members.clone())
                }
            }
            Entry::Vacant(_) => LeaveOutcome::NotAMember,
        };

        if outcome != LeaveOutcome::NotAMember {
            self.inner.members.remove(conn);
            debug!(room = %room, connection = %conn, "left room");
        }
        outcome
    }

    /// Current members of `room` in join order; empty if the room does not
    /// exist. The returned snapshot is consistent and finite.
    pub fn members_of(&self, room: &RoomId) -> Vec<ConnectionId> {
        self.inner
            .rooms
            .get(room)
            .map(|members| members.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, room: &RoomId, conn: &ConnectionId) -> bool {
        self.inner
            .rooms
            .get(room)
            .is_some_and(|members| members.contains(conn))
    }

    /// Room the connection is currently in, if any.
    pub fn room_of(&self, conn: &ConnectionId) -> Option<RoomId> {
        self.inner.members.get(conn).map(|r| r.value().clone())
    }

    pub fn room_exists(&self, room: &RoomId) -> bool {
        self.inner.rooms.contains_key(room)
    }

    pub fn room_count(&self) -> usize {
        self.inner.rooms.len()
    }
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new()
    }
}
