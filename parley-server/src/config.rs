/// Tunables for the signaling core.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Capacity of each connection's outbound event queue. When a client
    /// stops draining its socket the queue fills up and further events for
    /// it are dropped instead of stalling the room.
    pub send_queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            send_queue_capacity: 64,
        }
    }
}
