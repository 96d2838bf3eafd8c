//! Session context: who is logged in and whether the connection is up.
//!
//! Created by a login (fresh or resumed from the credential store) and torn
//! down by logout or a rejected first login.

use crate::credentials::AuthRecord;
use crate::protocol::{BackendAction, CurrentUser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Default)]
pub struct Session {
    /// Mirror of the credential store's record
    auth: Option<AuthRecord>,
    /// Password typed at the login prompt, kept until the first snapshot
    /// confirms it
    pending_password: Option<String>,
    pub current_user: Option<CurrentUser>,
    pub connection: ConnectionStatus,
}

impl Session {
    pub fn new(cached: Option<AuthRecord>) -> Self {
        Self {
            auth: cached,
            ..Self::default()
        }
    }

    pub fn auth(&self) -> Option<&AuthRecord> {
        self.auth.as_ref()
    }

    /// A previous login succeeded and has not been logged out.
    pub fn is_logged_in(&self) -> bool {
        self.auth.as_ref().is_some_and(|a| a.is_logged_in)
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionStatus::Connected
    }

    pub fn has_pending_login(&self) -> bool {
        self.pending_password.is_some()
    }

    /// Start a login from prompt input. The password is only persisted once
    /// the server accepts it.
    pub fn begin_login(&mut self, id: String, password: String) -> BackendAction {
        self.pending_password = Some(password.clone());
        self.connection = ConnectionStatus::Connecting;
        BackendAction::Connect { id, password }
    }

    /// Reconnect with the stored record, if it is complete.
    pub fn resume(&mut self) -> Option<BackendAction> {
        let auth = self.auth.as_ref().filter(|a| a.can_resume())?;
        let action = BackendAction::Connect {
            id: auth.id.clone(),
            password: auth.password.clone(),
        };
        self.connection = ConnectionStatus::Connecting;
        Some(action)
    }

    /// Called on every `init` snapshot. Returns the record to persist when a
    /// fresh login just got confirmed.
    pub fn complete_login(&mut self, user: &CurrentUser) -> Option<AuthRecord> {
        self.current_user = Some(user.clone());
        let password = self.pending_password.take()?;
        let record = AuthRecord::new(&user.id, &password, &user.username);
        self.auth = Some(record.clone());
        Some(record)
    }

    /// Server confirmed a username change. Returns the record to persist.
    pub fn rename(&mut self, new_name: &str) -> Option<AuthRecord> {
        if let Some(user) = self.current_user.as_mut() {
            user.username = new_name.to_string();
        }
        let auth = self.auth.as_mut().filter(|a| !a.password.is_empty())?;
        auth.username = new_name.to_string();
        Some(auth.clone())
    }

    /// Name shown in the heading: the live user if known, else the stored one.
    pub fn display_name(&self) -> Option<&str> {
        self.current_user
            .as_ref()
            .map(|u| u.username.as_str())
            .or_else(|| self.auth.as_ref().map(|a| a.username.as_str()))
    }

    pub fn teardown(&mut self) {
        self.auth = None;
        self.pending_password = None;
        self.current_user = None;
        self.connection = ConnectionStatus::Disconnected;
    }
}
