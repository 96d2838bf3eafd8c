//! Backend event processing.
//!
//! Each event is a state transition on `ClientState`/`Session` plus a list of
//! [`Effect`]s the app carries out afterwards (storage, dialogs, backend
//! commands). Nothing here performs I/O.

use std::time::Instant;

use crate::credentials::AuthRecord;
use crate::notifications::RevealCard;
use crate::protocol::{ChatMessage, GuiEvent, InitPayload, ItemKind, ServerEvent};
use crate::session::{ConnectionStatus, Session};
use crate::state::ClientState;

pub const LOGIN_FAILED: &str = "Login Failed!";

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SaveCredentials(AuthRecord),
    ClearCredentials,
    /// Send `BackendAction::Disconnect`
    Disconnect,
    Alert(String),
    PromptLogin,
    /// Append to the chat transcript
    RecordChat(ChatMessage),
}

/// Apply one backend event.
pub fn process_event(
    state: &mut ClientState,
    session: &mut Session,
    event: GuiEvent,
    now: Instant,
) -> Vec<Effect> {
    match event {
        GuiEvent::Connected => {
            session.connection = ConnectionStatus::Connected;
            state.push_status("✓ Connected");
            Vec::new()
        }

        GuiEvent::Disconnected(reason) => {
            session.connection = ConnectionStatus::Disconnected;
            state.push_status(format!("✗ Disconnected: {}", reason));
            Vec::new()
        }

        GuiEvent::Error(msg) => {
            state.push_status(format!("⚠ {}", msg));
            Vec::new()
        }

        GuiEvent::ConnectError(msg) => on_connect_error(state, session, msg),

        GuiEvent::Server(event) => {
            // Pushes queued before a logout reached the backend.
            if !session.is_logged_in() && !session.has_pending_login() {
                tracing::debug!("Ignoring server event while logged out");
                return Vec::new();
            }
            process_server_event(state, session, event, now)
        }
    }
}

fn on_connect_error(state: &mut ClientState, session: &mut Session, msg: String) -> Vec<Effect> {
    state.push_status(format!("⚠ Connection refused: {}", msg));

    if session.is_logged_in() {
        // Known-good identity: keep retrying in the background.
        tracing::warn!("Connection refused for cached login, retrying: {}", msg);
        session.connection = ConnectionStatus::Connecting;
        return Vec::new();
    }

    tracing::info!("Login rejected: {}", msg);
    session.teardown();
    state.reset();
    vec![
        Effect::Disconnect,
        Effect::ClearCredentials,
        Effect::Alert(LOGIN_FAILED.to_string()),
        Effect::PromptLogin,
    ]
}

/// Dispatch a server push to its handler.
pub fn process_server_event(
    state: &mut ClientState,
    session: &mut Session,
    event: ServerEvent,
    now: Instant,
) -> Vec<Effect> {
    match event {
        ServerEvent::Init(init) => on_init(state, session, init),

        ServerEvent::UpdateOwnDares(items) => {
            on_list_update(state, ItemKind::Dare, &items);
            Vec::new()
        }

        ServerEvent::UpdateOwnTruths(items) => {
            on_list_update(state, ItemKind::Truth, &items);
            Vec::new()
        }

        ServerEvent::NewMessage(msg) => {
            state.notifications.message.show(
                format!("New message from {}", msg.username),
                state.message_banner_duration,
                now,
            );
            state.chat.push(msg.clone(), false);
            vec![Effect::RecordChat(msg)]
        }

        ServerEvent::RevealResult(text) => {
            state.reveal = Some(RevealCard::new(text, now));
            Vec::new()
        }

        ServerEvent::RevealNotification(notice) => {
            state.notifications.reveal.show(
                format!("{} revealed: {}", notice.username, notice.item),
                state.reveal_banner_duration,
                now,
            );
            Vec::new()
        }

        ServerEvent::ClearChat => {
            state.chat.clear();
            Vec::new()
        }

        ServerEvent::UsernameUpdated(name) => {
            state.heading_user = Some(name.clone());
            match session.rename(&name) {
                Some(record) => vec![Effect::SaveCredentials(record)],
                None => Vec::new(),
            }
        }

        ServerEvent::MessagesUpdated(messages) => {
            state.chat.replace_all(messages);
            Vec::new()
        }
    }
}

fn on_init(state: &mut ClientState, session: &mut Session, init: InitPayload) -> Vec<Effect> {
    let mut effects = Vec::new();
    if let Some(record) = session.complete_login(&init.current_user) {
        tracing::info!(user = %record.id, "Login confirmed");
        effects.push(Effect::SaveCredentials(record));
    }
    session.connection = ConnectionStatus::Connected;

    // Initial load: full rebuild, no transition needed.
    state.dares.replace_all(&init.dares);
    state.truths.replace_all(&init.truths);
    state.chat.replace_all(init.messages);
    state.heading_user = Some(init.current_user.username);
    effects
}

fn on_list_update(state: &mut ClientState, kind: ItemKind, items: &[crate::protocol::Item]) {
    let stats = state.list_mut(kind).reconcile(items);
    tracing::debug!(
        %kind,
        added = stats.added,
        updated = stats.updated,
        removed = stats.removed,
        "list reconciled"
    );
}
