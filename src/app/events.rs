//! Event processing from backend

use chrono::Local;
use std::time::Instant;

use super::TruthDareApp;
use crate::events::{self, Effect};
use crate::logging::LogEntry;
use crate::protocol::{BackendAction, ChatMessage};

impl TruthDareApp {
    /// Drain everything the backend sent since the last frame.
    pub fn process_events(&mut self, now: Instant) {
        while let Ok(event) = self.event_rx.try_recv() {
            let effects = events::process_event(&mut self.state, &mut self.session, event, now);
            for effect in effects {
                self.apply_effect(effect);
            }
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SaveCredentials(record) => {
                if let Err(e) =
                    self.credentials
                        .save(&record.id, &record.password, &record.username)
                {
                    tracing::warn!("Failed to store login: {}", e);
                }
            }
            Effect::ClearCredentials => {
                if let Err(e) = self.credentials.clear() {
                    tracing::warn!("Failed to clear stored login: {}", e);
                }
            }
            Effect::Disconnect => self.send(BackendAction::Disconnect),
            Effect::Alert(message) => self.dialogs.alert(message),
            Effect::PromptLogin => {
                self.dialogs.close_session_dialogs();
                self.dialogs.open_login(None);
            }
            Effect::RecordChat(msg) => self.record_chat(msg),
        }
    }

    fn record_chat(&self, msg: ChatMessage) {
        let Some(logger) = &self.chat_logger else {
            return;
        };
        let account = self
            .session
            .auth()
            .map(|a| a.id.clone())
            .or_else(|| self.session.current_user.as_ref().map(|u| u.id.clone()));
        if let Some(account) = account {
            logger.log(LogEntry {
                account,
                timestamp: Local::now().format("%H:%M:%S").to_string(),
                username: msg.username,
                message: msg.message,
            });
        }
    }
}
