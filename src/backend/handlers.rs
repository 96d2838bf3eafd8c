//! Event handlers for backend actions and server packets.

use crossbeam_channel::Sender;

use super::connection;
use super::main_loop::BackendState;
use crate::error::ClientError;
use crate::protocol::{BackendAction, GuiEvent, ServerEvent};
use crate::socketio::{self, EnginePacket, SocketPacket};

/// Handle a backend action from the GUI
pub async fn handle_backend_action(
    action: BackendAction,
    state: &mut BackendState,
    event_tx: &Sender<GuiEvent>,
) {
    match action {
        BackendAction::Connect { id, password } => {
            state.close_link().await;
            state.login = Some((id, password));
            connect(state, event_tx).await;
        }

        BackendAction::Disconnect => {
            state.close_link().await;
            state.login = None;
            state.retry_at = None;
            let _ = event_tx.send(GuiEvent::Disconnected("Logged out".into()));
        }

        BackendAction::Resume => {
            if state.link.is_some() {
                emit(state, event_tx, BackendAction::RequestFreshData).await;
            } else if state.login.is_some() {
                tracing::info!("Resumed while offline, reconnecting now");
                connect(state, event_tx).await;
            }
        }

        other => emit(state, event_tx, other).await,
    }
}

/// Send an action as a Socket.IO event on the live link.
async fn emit(state: &mut BackendState, event_tx: &Sender<GuiEvent>, action: BackendAction) {
    let Some((name, payload)) = action.to_emit() else {
        return;
    };
    let Some(link) = state.link.as_mut() else {
        tracing::debug!("Dropping '{}' while offline", name);
        let _ = event_tx.send(GuiEvent::Error(format!("Not connected: {} not sent", name)));
        return;
    };

    let frame = socketio::encode_event(name, payload.as_ref());
    if let Err(e) = link.send_frame(frame).await {
        tracing::warn!("Failed to send '{}': {}", name, e);
        state.lose_link(event_tx, format!("Write error: {}", e));
    }
}

/// Open a connection for the remembered login. Failures schedule a retry.
pub async fn connect(state: &mut BackendState, event_tx: &Sender<GuiEvent>) {
    let Some((id, password)) = state.login.clone() else {
        return;
    };
    state.retry_at = None;
    tracing::info!(user = %id, server = %state.config.server_url, "Connecting");

    match connection::establish_link(&state.config, &id, &password).await {
        Ok(link) => {
            state.link = Some(link);
            let _ = event_tx.send(GuiEvent::Connected);
        }
        Err(ClientError::AuthRejected(message)) => {
            let _ = event_tx.send(GuiEvent::ConnectError(message));
            state.schedule_retry();
        }
        Err(e) => {
            tracing::warn!("Connection attempt failed: {}", e);
            let _ = event_tx.send(GuiEvent::Error(e.to_string()));
            state.schedule_retry();
        }
    }
}

/// Route one packet read from the live link.
pub async fn handle_packet(
    packet: EnginePacket,
    state: &mut BackendState,
    event_tx: &Sender<GuiEvent>,
) {
    match packet {
        EnginePacket::Ping(data) => {
            let Some(link) = state.link.as_mut() else {
                return;
            };
            link.saw_ping();
            if let Err(e) = link.send_frame(format!("{}{}", socketio::PONG, data)).await {
                state.lose_link(event_tx, format!("Write error: {}", e));
            }
        }

        EnginePacket::Close => {
            state.lose_link(event_tx, "Server closed the transport".into());
        }

        EnginePacket::Message(SocketPacket::Event { name, payload, .. }) => {
            match ServerEvent::from_wire(&name, payload) {
                Ok(Some(event)) => {
                    let _ = event_tx.send(GuiEvent::Server(event));
                }
                Ok(None) => tracing::debug!("Ignoring unknown event '{}'", name),
                Err(e) => tracing::warn!("Malformed '{}' payload: {}", name, e),
            }
        }

        EnginePacket::Message(SocketPacket::Disconnect) => {
            // Server-initiated: no automatic reconnect, a resume brings us back.
            state.link = None;
            let _ = event_tx.send(GuiEvent::Disconnected("Server ended the session".into()));
        }

        EnginePacket::Message(SocketPacket::ConnectError { message }) => {
            state.link = None;
            let _ = event_tx.send(GuiEvent::ConnectError(message));
            state.schedule_retry();
        }

        EnginePacket::Message(_)
        | EnginePacket::Open(_)
        | EnginePacket::Pong(_)
        | EnginePacket::Upgrade
        | EnginePacket::Noop => {}
    }
}
