//! Top toolbar with session controls and the connection indicator.

use eframe::egui::{self, Color32, RichText, Stroke};

use super::theme::TruthDareTheme;
use crate::session::ConnectionStatus;

/// Actions that the toolbar can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Username button: open the rename dialog (or alert when logged out)
    EditUsername,
    ToggleDarkMode,
    ToggleEditSection,
    Reveal,
    Logout,
}

/// Everything the toolbar displays.
pub struct ToolbarView<'a> {
    pub username: Option<&'a str>,
    pub status: ConnectionStatus,
    pub dark_mode: bool,
    pub show_edit_section: bool,
    pub logged_in: bool,
}

/// Render the top toolbar. Returns Some(ToolbarAction) if an action was requested.
pub fn render_toolbar(
    ui: &mut egui::Ui,
    view: &ToolbarView<'_>,
    theme: &TruthDareTheme,
) -> Option<ToolbarAction> {
    let mut toolbar_action: Option<ToolbarAction> = None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        ui.spacing_mut().button_padding = egui::vec2(8.0, 4.0);

        ui.label(
            RichText::new("Truth or Dare")
                .heading()
                .strong()
                .color(theme.accent),
        );
        ui.separator();

        let name = view.username.unwrap_or("Not logged in");
        if ui
            .button(format!("👤 {}", name))
            .on_hover_text("Change username")
            .clicked()
        {
            toolbar_action = Some(ToolbarAction::EditUsername);
        }

        let mode_label = if view.dark_mode { "☀ Light" } else { "🌙 Dark" };
        if ui.button(mode_label).clicked() {
            toolbar_action = Some(ToolbarAction::ToggleDarkMode);
        }

        let edit_label = if view.show_edit_section {
            "Hide edit"
        } else {
            "Edit lists"
        };
        if ui.button(edit_label).clicked() {
            toolbar_action = Some(ToolbarAction::ToggleEditSection);
        }

        let reveal = egui::Button::new(RichText::new("🎲 Reveal").strong().color(Color32::WHITE))
            .fill(theme.accent);
        if ui.add_enabled(view.logged_in, reveal).clicked() {
            toolbar_action = Some(ToolbarAction::Reveal);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.add_enabled(view.logged_in, egui::Button::new("Logout")).clicked() {
                toolbar_action = Some(ToolbarAction::Logout);
            }
            ui.add_space(4.0);
            render_status_dot(ui, view.status, theme);
        });
    });

    toolbar_action
}

fn render_status_dot(ui: &mut egui::Ui, status: ConnectionStatus, theme: &TruthDareTheme) {
    let (text, color) = match status {
        ConnectionStatus::Connected => ("online", theme.success),
        ConnectionStatus::Connecting => ("connecting…", theme.warning),
        ConnectionStatus::Disconnected => ("offline", theme.text_muted),
    };
    ui.label(RichText::new(text).color(theme.text_secondary).small());

    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
    let center = rect.center();
    match status {
        ConnectionStatus::Connected => {
            // Glow effect
            ui.painter()
                .circle_filled(center, 6.0, Color32::from_rgba_unmultiplied(67, 181, 129, 40));
            ui.painter().circle_filled(center, 4.0, color);
        }
        ConnectionStatus::Connecting => {
            ui.painter().circle_filled(center, 4.0, color);
        }
        ConnectionStatus::Disconnected => {
            ui.painter()
                .circle_stroke(center, 4.0, Stroke::new(1.5, color));
        }
    }
}
