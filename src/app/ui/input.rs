//! Submission of the add and chat inputs

use crate::app::TruthDareApp;
use crate::protocol::{BackendAction, ItemKind};
use crate::validation::{validate_chat_message, validate_item_text};

impl TruthDareApp {
    /// Add the typed dare/truth. Blank input does nothing; the input is
    /// cleared only once the item was sent.
    pub fn submit_item(&mut self, kind: ItemKind) {
        if !self.session.is_logged_in() {
            return;
        }
        let raw = self.input.for_kind(kind);
        if raw.trim().is_empty() {
            return;
        }
        match validate_item_text(raw) {
            Ok(text) => {
                raw.clear();
                self.send(BackendAction::AddItem { kind, text });
            }
            Err(msg) => self.state.push_status(msg),
        }
    }

    pub fn submit_chat(&mut self) {
        if !self.session.is_logged_in() || self.input.chat.trim().is_empty() {
            return;
        }
        match validate_chat_message(&self.input.chat) {
            Ok(message) => {
                self.input.chat.clear();
                self.send(BackendAction::SendMessage(message));
            }
            Err(msg) => self.state.push_status(msg),
        }
    }
}
