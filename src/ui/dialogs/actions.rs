//! Dialog action types - dialogs return actions instead of mutating state directly.

use crate::protocol::ItemKind;

/// What a confirmation dialog was asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    ClearChat,
    Logout,
}

impl ConfirmKind {
    pub fn question(&self) -> &'static str {
        match self {
            ConfirmKind::ClearChat => "Clear all messages?",
            ConfirmKind::Logout => "Do you want to log out?",
        }
    }
}

/// Actions that dialogs can return to the main application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    /// Validated login input
    Login { id: String, password: String },

    EditItem {
        kind: ItemKind,
        id: String,
        new_text: String,
    },

    ChangeUsername(String),

    /// The user answered yes
    Confirmed(ConfirmKind),
}
