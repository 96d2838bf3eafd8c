//! Core application state, separated from UI logic.
//!
//! `ClientState` holds everything the screen shows: both entry lists, the
//! chat log, the reveal card, banners and the status log. UI components
//! receive it as a parameter rather than owning it.

use std::time::Duration;

use chrono::Local;

use crate::chat::ChatLog;
use crate::config::Settings;
use crate::entry_list::EntryList;
use crate::notifications::{Notifications, RevealCard};
use crate::protocol::ItemKind;

/// Status log lines kept before the oldest are dropped.
const MAX_STATUS_LINES: usize = 500;

pub struct ClientState {
    pub dares: EntryList,
    pub truths: EntryList,
    pub chat: ChatLog,

    /// Username shown in the edit section heading.
    pub heading_user: Option<String>,

    /// Last reveal result.
    pub reveal: Option<RevealCard>,

    pub notifications: Notifications,
    pub message_banner_duration: Duration,
    pub reveal_banner_duration: Duration,

    /// Timestamped connection/status lines.
    pub status_log: Vec<String>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl ClientState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            dares: EntryList::new(ItemKind::Dare),
            truths: EntryList::new(ItemKind::Truth),
            chat: ChatLog::new(),
            heading_user: None,
            reveal: None,
            notifications: Notifications::default(),
            message_banner_duration: settings.message_notification(),
            reveal_banner_duration: settings.reveal_notification(),
            status_log: Vec::new(),
        }
    }

    pub fn list(&self, kind: ItemKind) -> &EntryList {
        match kind {
            ItemKind::Dare => &self.dares,
            ItemKind::Truth => &self.truths,
        }
    }

    pub fn list_mut(&mut self, kind: ItemKind) -> &mut EntryList {
        match kind {
            ItemKind::Dare => &mut self.dares,
            ItemKind::Truth => &mut self.truths,
        }
    }

    pub fn heading(&self) -> String {
        match &self.heading_user {
            Some(name) => format!("Your Dares & Truths ({})", name),
            None => "Your Dares & Truths".to_string(),
        }
    }

    pub fn push_status(&mut self, line: impl AsRef<str>) {
        let ts = Local::now().format("%H:%M:%S").to_string();
        self.status_log.push(format!("[{}] {}", ts, line.as_ref()));
        // Keep log from growing too large
        if self.status_log.len() > MAX_STATUS_LINES {
            self.status_log.remove(0);
        }
    }

    pub fn last_status(&self) -> Option<&str> {
        self.status_log.last().map(String::as_str)
    }

    /// Clear everything rendered for the logged-in user.
    pub fn reset(&mut self) {
        self.dares.clear();
        self.truths.clear();
        self.chat.clear();
        self.heading_user = None;
        self.reveal = None;
        self.notifications.hide_all();
    }
}
