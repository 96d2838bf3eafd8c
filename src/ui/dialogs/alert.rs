//! Single-message alert with an OK button.

use eframe::egui;

pub struct AlertDialog {
    pub message: String,
    open: bool,
}

impl AlertDialog {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            open: true,
        }
    }

    pub fn render(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        egui::Window::new("Alert")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 80.0])
            .show(ctx, |ui| {
                ui.label(&self.message);
                ui.add_space(8.0);
                if ui.button("OK").clicked()
                    || ui.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape))
                {
                    self.open = false;
                }
            });
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
