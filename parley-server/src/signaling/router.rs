use crate::error::SignalingError;
use crate::room::RoomDirectory;
use crate::session::ConnectionRegistry;
use parley_core::{ConnectionId, RoomId, ServerEvent, Signal};
use tracing::{debug, warn};

/// Validates and relays signaling payloads between members of one room.
///
/// The router never interprets payloads; it checks that the sender is in a
/// room and, for point-to-point kinds, that the target is a current room-mate,
/// then forwards. Validation reads a consistent membership snapshot but takes
/// no lock of its own.
#[derive(Clone)]
pub struct MessageRouter {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
}

impl MessageRouter {
    pub fn new(registry: ConnectionRegistry, directory: RoomDirectory) -> Self {
        Self {
            registry,
            directory,
        }
    }

    pub fn relay(&self, signal: Signal) -> Result<(), SignalingError> {
        let sender = signal.sender();
        let room = self
            .registry
            .room_of(&sender)
            .ok_or(SignalingError::NotInRoom)?;
        debug!(room = %room, sender = %sender, kind = ?signal.kind(), "relaying");

        match signal {
            Signal::CallOffer {
                sender,
                target,
                offer,
            } => self.deliver(
                &room,
                target,
                ServerEvent::CallIncoming {
                    sender_id: sender,
                    offer,
                },
            ),
            Signal::CallAnswer {
                sender,
                target,
                answer,
            } => self.deliver(
                &room,
                target,
                ServerEvent::CallAnswered {
                    sender_id: sender,
                    answer,
                },
            ),
            Signal::IceCandidate {
                sender,
                target,
                candidate,
            } => self.deliver(
                &room,
                target,
                ServerEvent::IceCandidate {
                    sender_id: sender,
                    candidate,
                },
            ),
            Signal::ChatText { sender, text } => {
                self.broadcast(&room, sender, &text);
                Ok(())
            }
        }
    }

    /// Point-to-point delivery, exactly once, best effort. A target that is
    /// no longer a room-mate or whose transport is closing yields
    /// `UnknownTarget`; call setup payloads are useless once the recipient is
    /// gone, so there is no retry.
    fn deliver(
        &self,
        room: &RoomId,
        target: ConnectionId,
        event: ServerEvent,
    ) -> Result<(), SignalingError> {
        if !self.directory.contains(room, &target) {
            return Err(SignalingError::UnknownTarget(target));
        }
        if !self.registry.send_to(&target, event) {
            warn!(room = %room, target = %target, "delivery failed, treating target as gone");
            return Err(SignalingError::UnknownTarget(target));
        }
        Ok(())
    }

    /// Chat fan-out to every room member except the sender, in join order.
    /// Each delivery is independent; one full or closed queue never holds up
    /// the others.
    fn broadcast(&self, room: &RoomId, sender: ConnectionId, text: &str) {
        let mut delivered = 0;
        for member in self.directory.members_of(room) {
            if member == sender {
                continue;
            }
            let event = ServerEvent::ReceiveMessage {
                sender_id: sender,
                text: text.to_string(),
            };
            if self.registry.send_to(&member, event) {
                delivered += 1;
            }
        }
        debug!(room = %room, sender = %sender, delivered, "chat broadcast");
    }
}
