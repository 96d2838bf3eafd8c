//! Toolbar, list section, chat panel and reveal card rendering

use eframe::egui::{self, RichText};
use std::time::Instant;

use crate::app::TruthDareApp;
use crate::entry_list::EntryAction;
use crate::notifications::RevealCard;
use crate::protocol::{BackendAction, ItemKind};
use crate::ui;
use crate::ui::chat::ChatAction;
use crate::ui::dialogs::ConfirmKind;
use crate::ui::theme::TruthDareTheme;
use crate::ui::toolbar::{ToolbarAction, ToolbarView};

impl TruthDareApp {
    /// Render the toolbar at the top of the window
    pub(in crate::app) fn render_toolbar(&mut self, ctx: &egui::Context) {
        let theme = self.get_theme();

        let view = ToolbarView {
            username: self.session.display_name(),
            status: self.session.connection,
            dark_mode: self.settings.dark_mode,
            show_edit_section: self.settings.show_edit_section,
            logged_in: self.session.is_logged_in(),
        };

        let mut requested = None;
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                requested = ui::toolbar::render_toolbar(ui, &view, &theme);
            });

        if let Some(action) = requested {
            self.handle_toolbar_action(ctx, action);
        }
    }

    pub(in crate::app) fn handle_toolbar_action(
        &mut self,
        ctx: &egui::Context,
        action: ToolbarAction,
    ) {
        match action {
            ToolbarAction::EditUsername => {
                if !self.session.is_logged_in() {
                    self.dialogs.alert("Login first!");
                    return;
                }
                let current = self
                    .session
                    .auth()
                    .map(|a| a.username.clone())
                    .unwrap_or_default();
                self.dialogs.open_username(&current);
            }
            ToolbarAction::ToggleDarkMode => {
                self.settings.dark_mode = !self.settings.dark_mode;
                ui::theme::apply_app_style(ctx, self.settings.dark_mode);
                self.save_settings();
            }
            ToolbarAction::ToggleEditSection => {
                self.settings.show_edit_section = !self.settings.show_edit_section;
                self.save_settings();
            }
            ToolbarAction::Reveal => self.send_if_logged_in(BackendAction::RevealItem),
            ToolbarAction::Logout => self.dialogs.open_confirm(ConfirmKind::Logout),
        }
    }

    /// Chat lives in a resizable right-hand panel
    pub(in crate::app) fn render_chat_panel(&mut self, ctx: &egui::Context) {
        let theme = self.get_theme();
        let mut requested = None;

        egui::SidePanel::right("chat_panel")
            .resizable(true)
            .default_width(340.0)
            .min_width(240.0)
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(12.0)
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                requested =
                    ui::chat::render_chat(ui, &mut self.state.chat, &mut self.input.chat, &theme);
            });

        match requested {
            Some(ChatAction::Send) => self.submit_chat(),
            Some(ChatAction::RequestClear) => self.dialogs.open_confirm(ConfirmKind::ClearChat),
            None => {}
        }
    }

    /// Reveal card plus, when enabled, the editable lists
    pub(in crate::app) fn render_central_panel(&mut self, ctx: &egui::Context, now: Instant) {
        let theme = self.get_theme();
        let mut submitted = Vec::new();
        let mut entry_actions = Vec::new();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme.surface[0]).inner_margin(16.0))
            .show(ctx, |ui| {
                render_reveal_card(ui, self.state.reveal.as_ref(), &theme, now);
                ui.add_space(12.0);

                if !self.settings.show_edit_section {
                    return;
                }

                ui.heading(self.state.heading());
                ui.add_space(6.0);

                egui::ScrollArea::vertical()
                    .id_salt("edit_section")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.columns(2, |columns| {
                            for (column, kind) in columns.iter_mut().zip([ItemKind::Dare, ItemKind::Truth]) {
                                let output = ui::lists::render_entry_list(
                                    column,
                                    self.state.list(kind),
                                    self.input.for_kind(kind),
                                    &theme,
                                );
                                if output.submitted {
                                    submitted.push(kind);
                                }
                                if let Some(action) = output.action {
                                    entry_actions.push(action);
                                }
                            }
                        });
                    });
            });

        for kind in submitted {
            self.submit_item(kind);
        }
        for action in entry_actions {
            self.handle_entry_action(action);
        }
    }

    pub fn handle_entry_action(&mut self, action: EntryAction) {
        if !self.session.is_logged_in() {
            return;
        }
        match action {
            EntryAction::Edit { .. } => self.dialogs.open_edit_item(&action),
            EntryAction::Delete { kind, id } => {
                self.send(BackendAction::DeleteItem { kind, id });
            }
        }
    }
}

fn render_reveal_card(
    ui: &mut egui::Ui,
    reveal: Option<&RevealCard>,
    theme: &TruthDareTheme,
    now: Instant,
) {
    egui::Frame::new()
        .fill(theme.surface[4])
        .stroke(egui::Stroke::new(1.5, theme.accent))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(20, 18))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| match reveal {
                Some(card) => {
                    ui.multiply_opacity(card.opacity(now));
                    ui.label(
                        RichText::new(&card.text)
                            .text_style(egui::TextStyle::Name("reveal".into()))
                            .strong()
                            .color(theme.text_primary),
                    );
                }
                None => {
                    ui.label(
                        RichText::new("Press Reveal to draw a dare or truth")
                            .italics()
                            .color(theme.text_muted),
                    );
                }
            });
        });
}
