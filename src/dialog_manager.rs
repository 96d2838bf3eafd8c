//! Dialog management for centralized dialog state and rendering.
//!
//! Uses the Option<Dialog> pattern where None = closed, Some = open. Alerts
//! block: while one is up, no other dialog is drawn, so "Login Failed!" is
//! acknowledged before the login dialog comes back.

use eframe::egui::Context;

use crate::entry_list::EntryAction;
use crate::ui::dialogs::{
    AlertDialog, ConfirmDialog, ConfirmKind, DialogAction, EditItemDialog, LoginDialog,
    UsernameDialog,
};

#[derive(Default)]
pub struct DialogManager {
    pub login_dialog: Option<LoginDialog>,
    pub edit_item_dialog: Option<EditItemDialog>,
    pub username_dialog: Option<UsernameDialog>,
    pub confirm_dialog: Option<ConfirmDialog>,
    /// Pending alerts, shown one at a time in order
    pub alerts: Vec<AlertDialog>,
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the login dialog unless one is already up.
    pub fn open_login(&mut self, last_id: Option<&str>) {
        if self.login_dialog.is_none() {
            self.login_dialog = Some(LoginDialog::new(last_id));
        }
    }

    pub fn is_login_open(&self) -> bool {
        self.login_dialog.is_some()
    }

    /// Open the edit dialog for an entry's Edit button. Delete actions are
    /// not dialogs and are ignored here.
    pub fn open_edit_item(&mut self, action: &EntryAction) {
        if let EntryAction::Edit { kind, id, old_text } = action {
            self.edit_item_dialog = Some(EditItemDialog::new(*kind, id, old_text));
        }
    }

    pub fn open_username(&mut self, current_name: &str) {
        self.username_dialog = Some(UsernameDialog::new(current_name));
    }

    pub fn open_confirm(&mut self, kind: ConfirmKind) {
        self.confirm_dialog = Some(ConfirmDialog::new(kind));
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(AlertDialog::new(message));
    }

    /// Close everything tied to the logged-in session.
    pub fn close_session_dialogs(&mut self) {
        self.edit_item_dialog = None;
        self.username_dialog = None;
        self.confirm_dialog = None;
    }

    /// Render all dialogs and collect their actions.
    pub fn render(&mut self, ctx: &Context) -> Vec<DialogAction> {
        let mut actions: Vec<DialogAction> = Vec::new();

        if let Some(alert) = self.alerts.first_mut() {
            alert.render(ctx);
            if !alert.is_open() {
                self.alerts.remove(0);
            }
            return actions;
        }

        if let Some(ref mut dialog) = self.login_dialog {
            if let Some(action) = dialog.render(ctx) {
                actions.push(action);
            }
            let close_login_dialog = !dialog.is_open();
            if close_login_dialog {
                self.login_dialog = None;
            }
            // Nothing else is usable until someone is logged in.
            return actions;
        }

        let mut close_edit_dialog = false;
        if let Some(ref mut dialog) = self.edit_item_dialog {
            if let Some(action) = dialog.render(ctx) {
                actions.push(action);
            }
            if !dialog.is_open() {
                close_edit_dialog = true;
            }
        }
        if close_edit_dialog {
            self.edit_item_dialog = None;
        }

        let mut close_username_dialog = false;
        if let Some(ref mut dialog) = self.username_dialog {
            if let Some(action) = dialog.render(ctx) {
                actions.push(action);
            }
            if !dialog.is_open() {
                close_username_dialog = true;
            }
        }
        if close_username_dialog {
            self.username_dialog = None;
        }

        let mut close_confirm_dialog = false;
        if let Some(ref mut dialog) = self.confirm_dialog {
            if let Some(action) = dialog.render(ctx) {
                actions.push(action);
            }
            if !dialog.is_open() {
                close_confirm_dialog = true;
            }
        }
        if close_confirm_dialog {
            self.confirm_dialog = None;
        }

        actions
    }
}
