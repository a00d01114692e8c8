use crate::model::connection::ConnectionId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// Events a client sends over its signaling socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    JoinCall {
        room_id: RoomId,
        display_name: String,
    },
    LeaveCall,
    CallUser {
        target_id: ConnectionId,
        offer: String,
    },
    AnswerCall {
        target_id: ConnectionId,
        answer: String,
    },
    IceCandidate {
        target_id: ConnectionId,
        candidate: String,
    },
    SendMessage {
        text: String,
    },
}

/// Events the core pushes to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Sent once right after the socket opens, carrying the server-assigned
    /// connection id the client will be addressed by.
    Welcome { connection_id: ConnectionId },
    /// Reply to `join-call`: everyone who was already in the room. The joiner
    /// is expected to initiate call setup with each listed member.
    RoomJoined { members: Vec<MemberInfo> },
    UserJoined {
        connection_id: ConnectionId,
        display_name: String,
    },
    UserLeft { connection_id: ConnectionId },
    CallIncoming {
        sender_id: ConnectionId,
        offer: String,
    },
    CallAnswered {
        sender_id: ConnectionId,
        answer: String,
    },
    IceCandidate {
        sender_id: ConnectionId,
        candidate: String,
    },
    ReceiveMessage {
        sender_id: ConnectionId,
        text: String,
    },
    SignalingError { code: ErrorCode, detail: String },
}

/// One entry of the pre-join member snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    pub connection_id: ConnectionId,
    pub display_name: String,
}

/// Wire-visible error codes carried by `signaling-error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    DuplicateConnection,
    AlreadyInRoom,
    NotInRoom,
    UnknownTarget,
}
