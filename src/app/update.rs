//! Main update loop

use eframe::egui;
use std::time::{Duration, Instant};

use super::TruthDareApp;
use crate::ui;

/// Backend events are polled at least this often.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

impl eframe::App for TruthDareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Process backend events
        self.process_events(now);

        // Regaining focus stands in for the page becoming visible again
        let focused = ctx.input(|i| i.focused);
        if focused && !self.was_focused {
            self.resume();
        }
        self.was_focused = focused;
        if focused {
            self.state.chat.clear_unread();
        }

        self.tick(now);
        self.update_title(ctx);

        let theme = self.get_theme();

        // Render UI sections
        self.render_toolbar(ctx);
        self.render_chat_panel(ctx);
        self.render_central_panel(ctx, now);

        ui::dialogs::render_banners(ctx, &self.state.notifications, &theme, now);
        ui::dialogs::render_status_toast(ctx, self.state.last_status(), &theme);

        self.render_dialogs(ctx);

        // Keep polling, and wake up in time to hide a banner
        let mut next = POLL_INTERVAL;
        if let Some(deadline) = self.state.notifications.next_deadline(now) {
            next = next.min(deadline);
        }
        if let Some(at) = self.login_prompt_at {
            next = next.min(at.saturating_duration_since(now));
        }
        if self.state.reveal.as_ref().is_some_and(|r| r.is_animating(now)) {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(next);
        }
    }
}

impl TruthDareApp {
    /// Unread count in the title while the window is in the background.
    fn update_title(&mut self, ctx: &egui::Context) {
        let title = match self.state.chat.unread_count {
            0 => "Truth or Dare".to_string(),
            n => format!("({}) Truth or Dare", n),
        };
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }
}
