mod connection;
mod event;
mod room;
mod signal;

pub use connection::ConnectionId;
pub use event::{ClientEvent, ErrorCode, MemberInfo, ServerEvent};
pub use room::RoomId;
pub use signal::{Signal, SignalKind};
