pub mod chat_tests;
pub mod relay_tests;

use parley_server::{ServerConfig, SessionManager};
use tracing::Level;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_sessions() -> SessionManager {
    init_tracing();
    SessionManager::new(ServerConfig::default())
}
