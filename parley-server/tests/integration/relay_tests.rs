use crate::integration::create_sessions;
use crate::utils::TestPeer;
use parley_core::{ConnectionId, ErrorCode, ServerEvent, Signal};
use parley_server::SignalingError;

#[tokio::test]
async fn offer_is_delivered_to_the_target_exactly_once() {
    let sessions = create_sessions();

    let (mut x, _) = TestPeer::join_fresh(&sessions, "r1", "xenia");
    let (mut y, _) = TestPeer::join_fresh(&sessions, "r1", "yuri");
    let (mut z, _) = TestPeer::join_fresh(&sessions, "r1", "zoe");

    // Joining Z notified X and Y; clear those first.
    x.drain();
    y.drain();

    sessions
        .relay(Signal::CallOffer {
            sender: x.id,
            target: y.id,
            offer: "offer-sdp".to_string(),
        })
        .unwrap();

    assert_eq!(
        y.sole_event(),
        ServerEvent::CallIncoming {
            sender_id: x.id,
            offer: "offer-sdp".to_string(),
        }
    );
    z.assert_no_events();
    x.assert_no_events();
}

#[tokio::test]
async fn answer_and_ice_follow_the_same_path() {
    let sessions = create_sessions();

    let (mut x, _) = TestPeer::join_fresh(&sessions, "r1", "xenia");
    let (mut y, _) = TestPeer::join_fresh(&sessions, "r1", "yuri");
    x.drain();

    sessions
        .relay(Signal::CallAnswer {
            sender: y.id,
            target: x.id,
            answer: "answer-sdp".to_string(),
        })
        .unwrap();
    sessions
        .relay(Signal::IceCandidate {
            sender: y.id,
            target: x.id,
            candidate: "candidate:0 1 UDP".to_string(),
        })
        .unwrap();

    assert_eq!(
        x.drain(),
        vec![
            ServerEvent::CallAnswered {
                sender_id: y.id,
                answer: "answer-sdp".to_string(),
            },
            ServerEvent::IceCandidate {
                sender_id: y.id,
                candidate: "candidate:0 1 UDP".to_string(),
            },
        ]
    );
    y.assert_no_events();
}

#[tokio::test]
async fn offer_to_a_stranger_is_rejected_and_not_delivered() {
    let sessions = create_sessions();

    let (x, _) = TestPeer::join_fresh(&sessions, "r1", "xenia");
    let (mut z, _) = TestPeer::join_fresh(&sessions, "other", "zoe");

    let err = sessions
        .relay(Signal::CallOffer {
            sender: x.id,
            target: z.id,
            offer: "offer-sdp".to_string(),
        })
        .unwrap_err();

    assert_eq!(err, SignalingError::UnknownTarget(z.id));
    assert_eq!(err.code(), ErrorCode::UnknownTarget);
    z.assert_no_events();
}

#[tokio::test]
async fn relay_without_a_room_is_rejected() {
    let sessions = create_sessions();

    let x = TestPeer::connect(&sessions);
    let err = sessions
        .relay(Signal::CallOffer {
            sender: x.id,
            target: ConnectionId::new(),
            offer: "offer-sdp".to_string(),
        })
        .unwrap_err();

    assert_eq!(err, SignalingError::NotInRoom);
}

#[tokio::test]
async fn target_that_left_mid_flight_is_reported_not_crashed() {
    let sessions = create_sessions();

    let (x, _) = TestPeer::join_fresh(&sessions, "r1", "xenia");
    let (y, _) = TestPeer::join_fresh(&sessions, "r1", "yuri");

    // Y disconnects between X composing the offer and the relay running.
    sessions.disconnect(y.id);

    let err = sessions
        .relay(Signal::CallOffer {
            sender: x.id,
            target: y.id,
            offer: "stale-offer".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, SignalingError::UnknownTarget(y.id));
}
