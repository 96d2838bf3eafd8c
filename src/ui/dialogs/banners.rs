//! Notification banners and the status toast, drawn as floating areas.

use eframe::egui;
use std::time::Instant;

use crate::notifications::{Banner, Notifications};
use crate::ui::theme::TruthDareTheme;

/// Render visible banners stacked in the top-right corner.
pub fn render_banners(
    ctx: &egui::Context,
    notifications: &Notifications,
    theme: &TruthDareTheme,
    now: Instant,
) {
    let banners: Vec<(&Banner, egui::Color32)> = [
        (&notifications.message, theme.accent),
        (&notifications.reveal, theme.success),
    ]
    .into_iter()
    .filter(|(b, _)| b.is_visible(now))
    .collect();

    if banners.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("notification_banners"))
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 50.0])
        .show(ctx, |ui| {
            for (banner, color) in banners {
                egui::Frame::new()
                    .fill(theme.surface[4])
                    .stroke(egui::Stroke::new(1.5, color))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&banner.text).color(theme.text_primary));
                    });
                ui.add_space(6.0);
            }
        });
}

/// Last status line in the bottom-left corner (connection changes, errors).
pub fn render_status_toast(ctx: &egui::Context, status: Option<&str>, theme: &TruthDareTheme) {
    let Some(status) = status else {
        return;
    };

    egui::Area::new(egui::Id::new("status_toast_area"))
        .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(30, 30, 30, 200))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(10, 4))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(status).small().color(theme.text_muted));
                });
        });
}
