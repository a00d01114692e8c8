mod presence;
mod router;
mod ws_handler;

pub use presence::*;
pub use router::*;
pub use ws_handler::*;
