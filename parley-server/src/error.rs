use parley_core::{ConnectionId, ErrorCode, RoomId};
use thiserror::Error;

/// Errors surfaced by the signaling core.
///
/// All variants except `DuplicateConnection` are protocol-level conditions
/// reported back to the originating connection; none of them leave the
/// registry or directory inconsistent.
#[derive(Debug, Error, PartialEq)]
pub enum SignalingError {
    /// Registry invariant violation. Ids are generated at the transport
    /// layer, so hitting this means a programming error, not client input.
    #[error("connection {0} is already registered")]
    DuplicateConnection(ConnectionId),

    /// The connection tried to join while already a member of a room.
    #[error("already a member of room '{0}'")]
    AlreadyInRoom(RoomId),

    /// The operation requires room membership the connection does not have.
    #[error("not currently in a room")]
    NotInRoom,

    /// The addressed connection is not a live member of the sender's room.
    /// Normal and recoverable: the target may simply have left in flight.
    #[error("target {0} is not reachable in this room")]
    UnknownTarget(ConnectionId),
}

impl SignalingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SignalingError::DuplicateConnection(_) => ErrorCode::DuplicateConnection,
            SignalingError::AlreadyInRoom(_) => ErrorCode::AlreadyInRoom,
            SignalingError::NotInRoom => ErrorCode::NotInRoom,
            SignalingError::UnknownTarget(_) => ErrorCode::UnknownTarget,
        }
    }
}
