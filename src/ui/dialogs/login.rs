//! Login dialog. Stays up until valid input is submitted; empty fields are
//! rejected locally before anything reaches the network.

use eframe::egui;

use super::DialogAction;
use crate::validation::{validate_login_id, validate_password};

pub struct LoginDialog {
    pub id_input: String,
    pub password_input: String,
    /// Local validation message ("ID required!" etc.)
    pub error: Option<String>,
    open: bool,
    focus_pending: bool,
}

impl LoginDialog {
    pub fn new(last_id: Option<&str>) -> Self {
        Self {
            id_input: last_id.unwrap_or_default().to_string(),
            password_input: String::new(),
            error: None,
            open: true,
            focus_pending: true,
        }
    }

    /// Validate the fields. On success the dialog closes and the login is
    /// returned; on failure the message is kept for display.
    pub fn submit(&mut self) -> Option<DialogAction> {
        let result = validate_login_id(&self.id_input)
            .and_then(|id| validate_password(&self.password_input).map(|pw| (id, pw)));
        match result {
            Ok((id, password)) => {
                self.error = None;
                self.open = false;
                Some(DialogAction::Login { id, password })
            }
            Err(msg) => {
                self.error = Some(msg);
                None
            }
        }
    }

    pub fn render(&mut self, ctx: &egui::Context) -> Option<DialogAction> {
        if !self.open {
            return None;
        }

        let mut action = None;

        egui::Window::new("Login")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Login ID (betu or puchu):");
                let id_response = ui.add(
                    egui::TextEdit::singleline(&mut self.id_input).desired_width(220.0),
                );

                ui.label("Password:");
                let pw_response = ui.add(
                    egui::TextEdit::singleline(&mut self.password_input)
                        .password(true)
                        .desired_width(220.0),
                );

                if self.focus_pending {
                    if self.id_input.is_empty() {
                        id_response.request_focus();
                    } else {
                        pw_response.request_focus();
                    }
                    self.focus_pending = false;
                }

                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::from_rgb(240, 71, 71), err);
                }

                ui.add_space(8.0);
                if ui.button("Login").clicked()
                    || ui.input(|i| i.key_pressed(egui::Key::Enter))
                {
                    action = self.submit();
                }
            });

        action
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
