use axum::extract::ws::{Message, WebSocket};
use engine::GameSnapshot;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::log;
use crate::messages::{ClientMessage, ServerMessage};
use crate::player_session::run_player_session;
use crate::web_server::AppState;

/// One controlled game per connection. Incoming frames are decoded and
/// queued for the session task; a separate send task drains the
/// session's updates into the socket.
pub async fn handle_play_socket(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (update_tx, mut update_rx) = mpsc::channel::<ServerMessage>(128);

    let send_task = tokio::spawn(async move {
        while let Some(message) = update_rx.recv().await {
            match serde_json::to_string(&message) {
                Ok(text) => {
                    if ws_sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => log!("Failed to encode server message: {}", e),
            }
        }
    });

    let (command_tx, command_rx) = mpsc::unbounded_channel::<ClientMessage>();
    let session_task = tokio::spawn(run_player_session(state, command_rx, update_tx));

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(command) => {
                    if command_tx.send(command).is_err() {
                        break;
                    }
                }
                // Malformed input is dropped, never fatal.
                Err(e) => log!("Ignoring malformed client message: {}", e),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                log!("WebSocket error: {}", e);
                break;
            }
        }
    }

    // The game dies with the connection: aborting the session cancels
    // its scheduled ticks so no stale clock outlives the socket.
    session_task.abort();
    send_task.abort();
}

/// Read-only stream of one spectator game.
pub async fn handle_watch_socket(mut socket: WebSocket, state: AppState, game_id: String) {
    let Some(mut state_rx) = state.spectators.subscribe(&game_id) else {
        let message = ServerMessage::Error {
            message: format!("Unknown game: {}", game_id),
        };
        if let Ok(text) = serde_json::to_string(&message) {
            let _ = socket.send(Message::Text(text.into())).await;
        }
        return;
    };

    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Late joiners get the current state straight away.
    let snapshot = state_rx.borrow().clone();
    if send_state(&mut ws_sender, snapshot).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = state_rx.borrow_and_update().clone();
                if send_state(&mut ws_sender, snapshot).await.is_err() {
                    break;
                }
            }
            incoming = ws_receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => continue,
                }
            }
        }
    }
}

async fn send_state(
    sender: &mut SplitSink<WebSocket, Message>,
    snapshot: GameSnapshot,
) -> Result<(), axum::Error> {
    let message = ServerMessage::State { state: snapshot };
    match serde_json::to_string(&message) {
        Ok(text) => sender.send(Message::Text(text.into())).await,
        Err(e) => {
            log!("Failed to encode spectator state: {}", e);
            Ok(())
        }
    }
}
