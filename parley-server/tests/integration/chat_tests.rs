use crate::integration::create_sessions;
use crate::utils::TestPeer;
use parley_core::{ServerEvent, Signal};

#[tokio::test]
async fn chat_reaches_every_other_member_exactly_once() {
    let sessions = create_sessions();

    let (mut x, _) = TestPeer::join_fresh(&sessions, "r1", "xenia");
    let (mut y, _) = TestPeer::join_fresh(&sessions, "r1", "yuri");
    let (mut z, _) = TestPeer::join_fresh(&sessions, "r1", "zoe");
    x.drain();
    y.drain();

    sessions
        .relay(Signal::ChatText {
            sender: x.id,
            text: "hi".to_string(),
        })
        .unwrap();

    let expected = ServerEvent::ReceiveMessage {
        sender_id: x.id,
        text: "hi".to_string(),
    };
    assert_eq!(y.sole_event(), expected);
    assert_eq!(z.sole_event(), expected);
    x.assert_no_events();
}

#[tokio::test]
async fn chat_stays_inside_the_room() {
    let sessions = create_sessions();

    let (x, _) = TestPeer::join_fresh(&sessions, "r1", "xenia");
    let (_y, _) = TestPeer::join_fresh(&sessions, "r1", "yuri");
    let (mut outsider, _) = TestPeer::join_fresh(&sessions, "r2", "olga");

    sessions
        .relay(Signal::ChatText {
            sender: x.id,
            text: "room-local".to_string(),
        })
        .unwrap();

    outsider.assert_no_events();
}

#[tokio::test]
async fn chat_in_a_room_of_one_delivers_nothing() {
    let sessions = create_sessions();

    let (mut x, _) = TestPeer::join_fresh(&sessions, "r1", "xenia");

    sessions
        .relay(Signal::ChatText {
            sender: x.id,
            text: "anyone?".to_string(),
        })
        .unwrap();

    x.assert_no_events();
}
