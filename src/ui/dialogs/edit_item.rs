//! Edit dialog for a single dare or truth, prefilled with the current text.

use eframe::egui;

use super::DialogAction;
use crate::protocol::ItemKind;
use crate::validation::validate_item_text;

pub struct EditItemDialog {
    pub open: bool,
    pub text_input: String,
    kind: ItemKind,
    id: String,
    error: Option<String>,
}

impl EditItemDialog {
    pub fn new(kind: ItemKind, id: &str, old_text: &str) -> Self {
        Self {
            open: true,
            text_input: old_text.to_string(),
            kind,
            id: id.to_string(),
            error: None,
        }
    }

    /// Blank input is a cancel, like dismissing the prompt.
    pub fn submit(&mut self) -> Option<DialogAction> {
        if self.text_input.trim().is_empty() {
            self.open = false;
            return None;
        }
        match validate_item_text(&self.text_input) {
            Ok(new_text) => {
                self.open = false;
                Some(DialogAction::EditItem {
                    kind: self.kind,
                    id: self.id.clone(),
                    new_text,
                })
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
        let mut still_open = true;

        egui::Window::new(format!("Edit {}", self.kind.as_str()))
            .open(&mut still_open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.text_input).desired_width(320.0),
                );
                response.request_focus();

                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::from_rgb(240, 71, 71), err);
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
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
