mod model;

pub use model::{
    ClientEvent, ConnectionId, ErrorCode, MemberInfo, RoomId, ServerEvent, Signal, SignalKind,
};
