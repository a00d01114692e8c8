use crate::session::SessionManager;
use axum::Router;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use parley_core::{ClientEvent, ConnectionId, ServerEvent, Signal};
use tracing::{error, info, warn};

/// Builds the signaling router: a single WebSocket upgrade endpoint.
pub fn app(sessions: SessionManager) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(sessions)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(sessions): State<SessionManager>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, sessions))
}

async fn handle_socket(socket: WebSocket, sessions: SessionManager) {
    let (conn_id, mut rx) = match sessions.connect() {
        Ok(pair) => pair,
        Err(e) => {
            // Ids are freshly minted, so a collision is a programming error.
            error!("failed to register connection: {e}");
            return;
        }
    };
    info!("new WebSocket connection: {conn_id}");

    let (mut sender, mut receiver) = socket.split();

    sessions.send_to(
        &conn_id,
        ServerEvent::Welcome {
            connection_id: conn_id,
        },
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    error!("failed to serialize event for {conn_id}: {e}");
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let sessions = sessions.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => handle_event(&sessions, conn_id, event),
                        Err(e) => warn!("invalid event from {conn_id}: {e}"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Runs whether the client said goodbye or the link just died; the
    // session manager treats both as the same implicit leave.
    sessions.disconnect(conn_id);
    info!("WebSocket disconnected: {conn_id}");
}

fn handle_event(sessions: &SessionManager, conn_id: ConnectionId, event: ClientEvent) {
    let result = match event {
        ClientEvent::JoinCall {
            room_id,
            display_name,
        } => sessions.join(conn_id, room_id, display_name).map(|members| {
            sessions.send_to(&conn_id, ServerEvent::RoomJoined { members });
        }),
        ClientEvent::LeaveCall => sessions.leave(conn_id),
        ClientEvent::CallUser { target_id, offer } => sessions.relay(Signal::CallOffer {
            sender: conn_id,
            target: target_id,
            offer,
        }),
        ClientEvent::AnswerCall { target_id, answer } => sessions.relay(Signal::CallAnswer {
            sender: conn_id,
            target: target_id,
            answer,
        }),
        ClientEvent::IceCandidate {
            target_id,
            candidate,
        } => sessions.relay(Signal::IceCandidate {
            sender: conn_id,
            target: target_id,
            candidate,
        }),
        ClientEvent::SendMessage { text } => sessions.relay(Signal::ChatText {
            sender: conn_id,
            text,
        }),
    };

    if let Err(err) = result {
        warn!("signaling error for {conn_id}: {err}");
        sessions.send_to(
            &conn_id,
            ServerEvent::SignalingError {
                code: err.code(),
                detail: err.to_string(),
            },
        );
    }
}
