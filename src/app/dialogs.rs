//! Dialog rendering orchestration

use eframe::egui;
use std::time::Instant;

use super::TruthDareApp;
use crate::protocol::BackendAction;
use crate::ui::dialogs::{ConfirmKind, DialogAction};

impl TruthDareApp {
    /// Render all dialogs and handle their actions
    pub(super) fn render_dialogs(&mut self, ctx: &egui::Context) {
        let actions = self.dialogs.render(ctx);
        let now = Instant::now();
        for action in actions {
            self.handle_dialog_action(action, now);
        }
    }

    /// Handle dialog actions by sending appropriate backend commands
    pub fn handle_dialog_action(&mut self, action: DialogAction, now: Instant) {
        match action {
            DialogAction::Login { id, password } => {
                self.dialogs.login_dialog = None;
                self.state.push_status(format!("Logging in as {}…", id));
                let action = self.session.begin_login(id, password);
                self.send(action);
            }
            DialogAction::EditItem { kind, id, new_text } => {
                self.send_if_logged_in(BackendAction::EditItem { kind, id, new_text });
            }
            DialogAction::ChangeUsername(name) => {
                self.send_if_logged_in(BackendAction::EditUsername(name));
            }
            DialogAction::Confirmed(ConfirmKind::ClearChat) => {
                self.send_if_logged_in(BackendAction::ClearChat);
            }
            DialogAction::Confirmed(ConfirmKind::Logout) => self.logout(now),
        }
    }
}
