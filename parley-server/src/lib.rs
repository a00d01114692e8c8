mod config;
mod error;
mod room;
mod session;
mod signaling;

pub use config::ServerConfig;
pub use error::SignalingError;
pub use room::{LeaveOutcome, RoomDirectory};
pub use session::{ConnectionRegistry, SessionManager};
pub use signaling::{MessageRouter, PresenceBroadcaster, app, ws_handler};
