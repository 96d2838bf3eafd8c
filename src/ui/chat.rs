//! Chat panel: message log and composer.

use eframe::egui::{self, RichText};

use super::theme::{user_color, TruthDareTheme};
use crate::chat::ChatLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    /// Send button or Enter in the composer
    Send,
    /// Clear button; the app asks for confirmation first
    RequestClear,
}

pub fn render_chat(
    ui: &mut egui::Ui,
    chat: &mut ChatLog,
    input: &mut String,
    theme: &TruthDareTheme,
) -> Option<ChatAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Chat").strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("Clear").clicked() {
                action = Some(ChatAction::RequestClear);
            }
        });
    });

    let composer_height = 36.0;
    let log_height = (ui.available_height() - composer_height).max(80.0);

    egui::Frame::new()
        .fill(theme.surface[2])
        .corner_radius(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("chat_log")
                .max_height(log_height)
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    if chat.is_empty() {
                        ui.label(RichText::new("No messages yet").italics().color(theme.text_muted));
                    }
                    for msg in &chat.messages {
                        ui.horizontal_wrapped(|ui| {
                            ui.spacing_mut().item_spacing.x = 0.0;
                            ui.label(
                                RichText::new(&msg.username)
                                    .text_style(egui::TextStyle::Name("chat_user".into()))
                                    .strong()
                                    .color(user_color(&msg.username)),
                            );
                            ui.label(RichText::new(format!(": {}", msg.message)).color(theme.text_primary));
                        });
                    }
                    if chat.scroll_to_bottom {
                        ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                    }
                });
        });
    chat.scroll_to_bottom = false;

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(input)
                .hint_text("Type a message… (Enter to send)")
                .desired_width(ui.available_width() - 60.0),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if enter {
            response.request_focus();
        }
        if ui.button("Send").clicked() || enter {
            action = Some(ChatAction::Send);
        }
    });

    action
}
