//! Session Consumer: bridges one WebSocket connection to room actions.
//!
//! Each connection is addressed by three path parameters baked into the
//! upgrade URL (`room_id`, `user_token`, `username`) rather than an
//! in-band join handshake. On connect the consumer synthesizes an
//! `add_player` action; every subsequent text frame is parsed as a
//! [`ClientMessage`], stamped with the connection's own token and room id,
//! and dispatched. On disconnect it synthesizes `exit_room`.
//!
//! Privacy filtering happens one layer down, in [`Room::broadcast_snapshot`]:
//! this module only relays whatever [`ServerMessage`] lands in its mpsc
//! receiver onto the wire.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use literature_core::error::GameError;
use literature_core::protocol::{ClientMessage, RoomAction, RoomActionKind, ServerMessage};
use tokio::sync::{Mutex, mpsc};

use crate::room::{Room, RoomRegistry};

/// Identifies one connection before it is bound to a room.
pub struct ConnectParams {
    pub room_id: String,
    pub user_token: String,
    pub username: String,
}

/// Drive a single WebSocket connection end to end.
///
/// Called after the Axum upgrade; `socket` is the full-duplex WebSocket.
pub async fn handle_socket(socket: WebSocket, params: ConnectParams, registry: Arc<RoomRegistry>) {
    let (mut ws_sink, mut ws_stream) = socket.split();

    let room = match registry.get_room(&params.room_id).await {
        Some(room) => room,
        None => {
            let not_found = GameError::not_found(format!("room '{}' does not exist", params.room_id));
            let err = ServerMessage::error(not_found.to_string(), true);
            send_one(&mut ws_sink, &err).await;
            return;
        }
    };

    // Connect-time `add_player`: the only action whose failure also closes
    // the connection (§7). The sender is attached before the action is
    // dispatched so this connection is guaranteed to observe the broadcast
    // its own join produces, and detached again if the join is rejected.
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    room.lock().await.attach_sender(&params.user_token, tx);

    let join = RoomAction {
        room_id: params.room_id.clone(),
        action_token: params.user_token.clone(),
        kind: RoomActionKind::AddPlayer {
            name: params.username.clone(),
        },
    };
    if let Err(e) = registry.register_action(join).await {
        tracing::warn!(room_id = %params.room_id, error = %e, "add_player rejected");
        room.lock().await.detach_sender(&params.user_token);
        let err = ServerMessage::error(e.to_string(), true);
        send_one(&mut ws_sink, &err).await;
        return;
    }
    tracing::info!(
        room_id = %params.room_id,
        username = %params.username,
        "player connected"
    );

    // Drain the mpsc receiver and forward each message as a text frame.
    let write_handle = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Ok(json) = serde_json::to_string(&msg) else {
                continue;
            };
            if ws_sink.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Read loop: parse, stamp with this connection's identity, dispatch.
    loop {
        match ws_stream.next().await {
            Some(Ok(Message::Text(text))) => {
                process_message(&text, &params, &registry, &room).await;
            }
            Some(Ok(Message::Close(_))) | None => break,
            Some(Err(_)) => break,
            _ => continue,
        }
    }

    // Cleanup: synthesize `exit_room`, same as any other client-submitted
    // action (§5: disconnect is an action, not a cancellation).
    let exit = RoomAction {
        room_id: params.room_id.clone(),
        action_token: params.user_token.clone(),
        kind: RoomActionKind::ExitRoom,
    };
    let _ = registry.register_action(exit).await;

    write_handle.abort();
    registry.remove_if_empty(&params.room_id).await;
    tracing::info!(room_id = %params.room_id, username = %params.username, "player disconnected");
}

async fn process_message(
    text: &str,
    params: &ConnectParams,
    registry: &Arc<RoomRegistry>,
    room: &Arc<Mutex<Room>>,
) {
    let client_message: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            let room = room.lock().await;
            room.send_error(&params.user_token, format!("invalid message: {e}"), false);
            return;
        }
    };

    let action = RoomAction {
        room_id: params.room_id.clone(),
        action_token: params.user_token.clone(),
        kind: client_message.into(),
    };
    if let Err(e) = registry.register_action(action).await {
        room.lock().await.send_error(&params.user_token, e.to_string(), false);
    }
}

/// Send a single [`ServerMessage`] directly on the raw sink half, used only
/// for the pre-channel connect-failure path.
async fn send_one(
    sink: &mut futures_util::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) {
    if let Ok(json) = serde_json::to_string(msg) {
        let _ = sink.send(Message::Text(json.into())).await;
    }
}
