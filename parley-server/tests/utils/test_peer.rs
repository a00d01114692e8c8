use parley_core::{ConnectionId, MemberInfo, RoomId, ServerEvent};
use parley_server::SessionManager;
use tokio::sync::mpsc;

/// One simulated participant: a registered connection plus the receive end
/// of its outbound event queue, in place of a real WebSocket.
pub struct TestPeer {
    pub id: ConnectionId,
    rx: mpsc::Receiver<ServerEvent>,
}

impl TestPeer {
    pub fn connect(sessions: &SessionManager) -> Self {
        let (id, rx) = sessions.connect().expect("failed to register test peer");
        Self { id, rx }
    }

    /// Connect and immediately join, discarding any events queued so far.
    pub fn join_fresh(
        sessions: &SessionManager,
        room: &str,
        name: &str,
    ) -> (Self, Vec<MemberInfo>) {
        let mut peer = Self::connect(sessions);
        let snapshot = peer.join(sessions, room, name);
        peer.drain();
        (peer, snapshot)
    }

    pub fn join(&self, sessions: &SessionManager, room: &str, name: &str) -> Vec<MemberInfo> {
        sessions
            .join(self.id, RoomId::from(room), name.to_string())
            .expect("join failed")
    }

    /// Everything queued for this peer so far, without waiting.
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// The single event queued for this peer; fails on none or more than one.
    pub fn sole_event(&mut self) -> ServerEvent {
        let mut events = self.drain();
        assert_eq!(events.len(), 1, "expected exactly one event, got {events:?}");
        events.remove(0)
    }

    pub fn assert_no_events(&mut self) {
        let events = self.drain();
        assert!(events.is_empty(), "expected no events, got {events:?}");
    }
}
