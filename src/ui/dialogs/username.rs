//! Username change dialog.

use eframe::egui;

use super::DialogAction;
use crate::validation::validate_username;

/// Self-contained username dialog state.
pub struct UsernameDialog {
    pub open: bool,
    pub name_input: String,
    error: Option<String>,
}

impl UsernameDialog {
    /// Create a new dialog prefilled with the current username
    pub fn new(current_name: &str) -> Self {
        Self {
            open: true,
            name_input: current_name.to_string(),
            error: None,
        }
    }

    fn can_save(&self) -> bool {
        !self.name_input.trim().is_empty()
    }

    pub fn submit(&mut self) -> Option<DialogAction> {
        if !self.can_save() {
            return None;
        }
        match validate_username(&self.name_input) {
            Ok(name) => {
                self.open = false;
                Some(DialogAction::ChangeUsername(name))
            }
            Err(msg) => {
                self.error = Some(msg);
                None
            }
        }
    }

    /// Returns `Some(DialogAction::ChangeUsername)` if the user confirmed a new name.
    pub fn render(&mut self, ctx: &egui::Context) -> Option<DialogAction> {
        if !self.open {
            return None;
        }

        let mut action: Option<DialogAction> = None;
        let mut still_open = true;

        egui::Window::new("Change Username")
            .open(&mut still_open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("New username:");

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.name_input).desired_width(200.0),
                );
                response.request_focus();

                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::from_rgb(240, 71, 71), err);
                }

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(self.can_save(), egui::Button::new("Save"))
                        .clicked()
                    {
                        action = self.submit();
                    }

                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }
                });

                if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action = self.submit();
                }

                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    self.open = false;
                }
            });

        if !still_open {
            self.open = false;
        }

        action
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
