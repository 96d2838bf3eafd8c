//! Dare and truth list rendering.
//!
//! Each row is keyed by its `NodeId`, so widget state (hover, focus) stays
//! attached to the same entry across reconciliation passes.

use eframe::egui::{self, RichText};

use super::theme::TruthDareTheme;
use crate::entry_list::{EntryAction, EntryList};

/// What happened in one list section this frame.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListOutput {
    /// Add button or Enter in the input
    pub submitted: bool,
    pub action: Option<EntryAction>,
}

/// Render one list with its add input.
pub fn render_entry_list(
    ui: &mut egui::Ui,
    list: &EntryList,
    input: &mut String,
    theme: &TruthDareTheme,
) -> ListOutput {
    let kind = list.kind();
    let mut output = ListOutput::default();

    ui.label(RichText::new(format!("{}s", kind.label())).strong());

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(input)
                .hint_text(format!("Add a {}…", kind.as_str()))
                .desired_width(ui.available_width() - 60.0),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if enter {
            response.request_focus();
        }
        if ui.button("Add").clicked() || enter {
            output.submitted = true;
        }
    });

    ui.add_space(4.0);

    if list.is_empty() {
        ui.label(
            RichText::new(format!("No {}s yet", kind.as_str()))
                .italics()
                .color(theme.text_muted),
        );
        return output;
    }

    for entry in list.entries() {
        ui.push_id(entry.node, |ui| {
            egui::Frame::new()
                .fill(theme.surface[2])
                .stroke(egui::Stroke::new(1.0, theme.border_subtle))
                .corner_radius(4.0)
                .inner_margin(egui::Margin::symmetric(8, 4))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Delete").clicked() {
                                output.action = Some(entry.delete_action(kind));
                            }
                            if ui.small_button("Edit").clicked() {
                                output.action = Some(entry.edit_action(kind));
                            }
                            ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                                ui.add(
                                    egui::Label::new(
                                        RichText::new(&entry.text).color(theme.text_primary),
                                    )
                                    .wrap(),
                                );
                            });
                        });
                    });
                });
        });
    }

    output
}
