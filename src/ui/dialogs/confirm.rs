//! Yes/no confirmation.

use eframe::egui;

use super::{ConfirmKind, DialogAction};

pub struct ConfirmDialog {
    pub kind: ConfirmKind,
    open: bool,
}

impl ConfirmDialog {
    pub fn new(kind: ConfirmKind) -> Self {
        Self { kind, open: true }
    }

    pub fn render(&mut self, ctx: &egui::Context) -> Option<DialogAction> {
        if !self.open {
            return None;
        }

        let mut action = None;

        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(self.kind.question());
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        action = Some(DialogAction::Confirmed(self.kind));
                        self.open = false;
                    }
                    if ui.button("Cancel").clicked()
                        || ui.input(|i| i.key_pressed(egui::Key::Escape))
                    {
                        self.open = false;
                    }
                });
            });

        action
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
