use crate::model::connection::ConnectionId;

/// Classification of a relayed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    CallOffer,
    CallAnswer,
    IceCandidate,
    ChatText,
}

/// One unit of relay. Lives only for the duration of the relay operation.
///
/// `sender` is always stamped from the transport-side connection id, never
/// taken from the client payload. The point-to-point kinds carry their target
/// structurally; chat is a room broadcast and has none.
#[derive(Debug, Clone)]
pub enum Signal {
    CallOffer {
        sender: ConnectionId,
        target: ConnectionId,
        offer: String,
    },
    CallAnswer {
        sender: ConnectionId,
        target: ConnectionId,
        answer: String,
    },
    IceCandidate {
        sender: ConnectionId,
        target: ConnectionId,
        candidate: String,
    },
    ChatText {
        sender: ConnectionId,
        text: String,
    },
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::CallOffer { .. } => SignalKind::CallOffer,
            Signal::CallAnswer { .. } => SignalKind::CallAnswer,
            Signal::IceCandidate { .. } => SignalKind::IceCandidate,
            Signal::ChatText { .. } => SignalKind::ChatText,
        }
    }

    pub fn sender(&self) -> ConnectionId {
        match self {
            Signal::CallOffer { sender, .. }
            | Signal::CallAnswer { sender, .. }
            | Signal::IceCandidate { sender, .. }
            | Signal::ChatText { sender, .. } => *sender,
        }
    }

    /// Target connection for the point-to-point kinds, `None` for chat.
    pub fn target(&self) -> Option<ConnectionId> {
        match self {
            Signal::CallOffer { target, .. }
            | Signal::CallAnswer { target, .. }
            | Signal::IceCandidate { target, .. } => Some(*target),
            Signal::ChatText { .. } => None,
        }
    }
}
